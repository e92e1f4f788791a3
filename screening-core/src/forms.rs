//! Mutating forms: make call, persona settings, bulk upload, auto-trigger.
//!
//! Each form validates locally, then maps the backend outcome to a
//! [`Notice`]. A failed validation never reaches the network.

use crate::client::{ScreeningApi, UploadFile};
use crate::error::ApiError;
use crate::models::{
    CallRequest, CallStarted, CandidateUploadResult, CvUploadResult, MessageResponse, PhoneNumber,
    SetPersonaRequest,
};
use thiserror::Error;

pub const MANUAL_ENTRY: &str = "Manual Entry";
pub const DEFAULT_MANUAL_DESCRIPTION: &str = "Custom prompt text";

pub const NUMBERS_FAILED: &str = "Failed to fetch phone numbers. Please try again later.";
pub const PERSONAS_FAILED: &str = "Failed to fetch personas. Please try again.";

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Phone number is required")]
    MissingPhoneNumber,
    #[error("Please select a CSV file to upload")]
    MissingCsv,
    #[error("Please select at least one CV file to upload")]
    MissingCvFiles,
    #[error("Prompt text is required for Manual Entry persona")]
    MissingPromptText,
    #[error("Call SID is required")]
    MissingCallSid,
}

/// Inline message shown above a form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn is_success(&self) -> bool {
        matches!(self, Notice::Success(_))
    }

    pub fn text(&self) -> &str {
        match self {
            Notice::Success(text) | Notice::Error(text) => text,
        }
    }

    fn failure(err: &ApiError, fallback: &str) -> Self {
        Notice::Error(err.message_or(fallback))
    }
}

impl From<FormError> for Notice {
    fn from(err: FormError) -> Self {
        Notice::Error(err.to_string())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MakeCallForm {
    pub number: String,
    pub from_number: String,
    pub name: String,
    pub location: String,
    pub product: String,
}

impl MakeCallForm {
    /// Preselects the first caller-id once the list arrives.
    pub fn apply_numbers(&mut self, numbers: &[PhoneNumber]) {
        if let Some(first) = numbers.first() {
            self.from_number = first.phone_number.clone();
        }
    }

    pub fn validate(&self) -> Result<CallRequest, FormError> {
        if self.number.trim().is_empty() {
            return Err(FormError::MissingPhoneNumber);
        }
        Ok(CallRequest {
            number: self.number.clone(),
            from_number: self.from_number.clone(),
            name: self.name.clone(),
            location: self.location.clone(),
            product: self.product.clone(),
        })
    }

    /// Clears the candidate fields; the chosen caller-id stays.
    pub fn reset(&mut self) {
        *self = Self {
            from_number: std::mem::take(&mut self.from_number),
            ..Self::default()
        };
    }

    pub fn outcome(result: &Result<CallStarted, ApiError>) -> Notice {
        match result {
            Ok(started) => Notice::Success(format!(
                "Call initiated successfully! Call SID: {}",
                started.call_sid
            )),
            Err(e) => Notice::failure(e, "Failed to initiate call. Please try again."),
        }
    }

    pub async fn submit<A: ScreeningApi + ?Sized>(&mut self, api: &A) -> Notice {
        let request = match self.validate() {
            Ok(request) => request,
            Err(e) => return e.into(),
        };
        let result = api.initiate_call(&request).await;
        let notice = Self::outcome(&result);
        if result.is_ok() {
            self.reset();
        }
        notice
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PersonaForm {
    pub personas: Vec<String>,
    pub selected: String,
    pub description: String,
    pub prompt_text: String,
}

impl PersonaForm {
    /// Installs the backend list, appending "Manual Entry" when missing, and
    /// selects the first entry.
    pub fn load(&mut self, mut personas: Vec<String>) {
        if !personas.iter().any(|p| p == MANUAL_ENTRY) {
            personas.push(MANUAL_ENTRY.to_string());
        }
        let first = personas[0].clone();
        self.personas = personas;
        self.select(&first);
    }

    pub fn select(&mut self, persona: &str) {
        self.selected = persona.to_string();
        if !self.is_manual() {
            self.description.clear();
            self.prompt_text.clear();
        }
    }

    pub fn is_manual(&self) -> bool {
        self.selected == MANUAL_ENTRY
    }

    pub fn validate(&self) -> Result<SetPersonaRequest, FormError> {
        if !self.is_manual() {
            return Ok(SetPersonaRequest {
                persona: self.selected.clone(),
                prompt_text: None,
                description: None,
            });
        }
        if self.prompt_text.is_empty() {
            return Err(FormError::MissingPromptText);
        }
        let description = if self.description.is_empty() {
            DEFAULT_MANUAL_DESCRIPTION.to_string()
        } else {
            self.description.clone()
        };
        Ok(SetPersonaRequest {
            persona: self.selected.clone(),
            prompt_text: Some(self.prompt_text.clone()),
            description: Some(description),
        })
    }

    pub fn outcome(result: &Result<MessageResponse, ApiError>) -> Notice {
        match result {
            Ok(response) => Notice::Success(
                response
                    .message
                    .clone()
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| "Persona set successfully".into()),
            ),
            Err(e) => Notice::failure(e, "Failed to set persona. Please try again."),
        }
    }

    pub async fn submit<A: ScreeningApi + ?Sized>(&self, api: &A) -> Notice {
        match self.validate() {
            Ok(request) => Self::outcome(&api.set_persona(&request).await),
            Err(e) => e.into(),
        }
    }
}

/// Tabs of the bulk upload page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UploadTab {
    #[default]
    Candidates,
    Cvs,
}

pub fn check_candidate_file<F>(file: Option<F>) -> Result<F, FormError> {
    file.ok_or(FormError::MissingCsv)
}

pub fn check_cv_files<F>(files: Vec<F>) -> Result<Vec<F>, FormError> {
    if files.is_empty() {
        return Err(FormError::MissingCvFiles);
    }
    Ok(files)
}

pub fn candidate_upload_outcome(result: &Result<CandidateUploadResult, ApiError>) -> Notice {
    match result {
        Ok(uploaded) => Notice::Success(format!(
            "Successfully uploaded {} candidates",
            uploaded.candidates.len()
        )),
        Err(e) => Notice::failure(e, "Failed to upload candidates. Please try again."),
    }
}

pub fn cv_upload_outcome(result: &Result<CvUploadResult, ApiError>) -> Notice {
    match result {
        Ok(uploaded) => Notice::Success(format!(
            "Successfully uploaded {} CV files",
            uploaded.files.len()
        )),
        Err(e) => Notice::failure(e, "Failed to upload CV files. Please try again."),
    }
}

pub async fn upload_candidates<A: ScreeningApi + ?Sized>(
    api: &A,
    file: Option<UploadFile>,
) -> Notice {
    match check_candidate_file(file) {
        Ok(file) => candidate_upload_outcome(&api.upload_candidates(file).await),
        Err(e) => e.into(),
    }
}

pub async fn upload_cvs<A: ScreeningApi + ?Sized>(api: &A, files: Vec<UploadFile>) -> Notice {
    match check_cv_files(files) {
        Ok(files) => cv_upload_outcome(&api.upload_cvs(files).await),
        Err(e) => e.into(),
    }
}

pub fn auto_trigger_outcome(result: &Result<CallStarted, ApiError>) -> Notice {
    match result {
        Ok(started) => Notice::Success(format!(
            "Call auto-triggered successfully! Call SID: {}",
            started.call_sid
        )),
        Err(e) => Notice::failure(e, "Failed to auto-trigger call. Please try again."),
    }
}

pub async fn end_call<A: ScreeningApi + ?Sized>(api: &A, call_sid: &str) -> Notice {
    if call_sid.trim().is_empty() {
        return FormError::MissingCallSid.into();
    }
    match api.end_call(call_sid.trim()).await {
        Ok(response) => Notice::Success(
            response
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| format!("Call {} ended", call_sid.trim())),
        ),
        Err(e) => Notice::failure(&e, "Failed to end call. Please try again."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubApi;

    fn numbers() -> Vec<PhoneNumber> {
        vec![
            PhoneNumber {
                sid: "PN1".into(),
                phone_number: "+911111".into(),
                friendly_name: "Mumbai".into(),
            },
            PhoneNumber {
                sid: "PN2".into(),
                phone_number: "+912222".into(),
                friendly_name: "Delhi".into(),
            },
        ]
    }

    #[tokio::test]
    async fn make_call_requires_phone_number_without_request() {
        let api = StubApi::default();
        let mut form = MakeCallForm::default();
        let notice = form.submit(&api).await;
        assert_eq!(notice, Notice::Error("Phone number is required".into()));
        assert_eq!(api.request_count(), 0);
    }

    #[tokio::test]
    async fn make_call_success_resets_but_keeps_caller_id() {
        let api = StubApi::default();
        let mut form = MakeCallForm::default();
        form.apply_numbers(&numbers());
        form.from_number = "+912222".into();
        form.number = "+919876543210".into();
        form.name = "Rakesh".into();

        let notice = form.submit(&api).await;

        assert_eq!(
            notice,
            Notice::Success("Call initiated successfully! Call SID: CA-stub-1".into())
        );
        assert_eq!(form.from_number, "+912222");
        assert!(form.number.is_empty() && form.name.is_empty());
        let sent = api.call_requests.lock().unwrap();
        assert_eq!(sent[0].from_number, "+912222");
        assert_eq!(sent[0].number, "+919876543210");
    }

    #[tokio::test]
    async fn make_call_failure_keeps_fields_and_shows_backend_error() {
        let api = StubApi::default();
        api.fail_next(400, Some("Invalid phone number"));
        let mut form = MakeCallForm {
            number: "123".into(),
            ..Default::default()
        };
        let notice = form.submit(&api).await;
        assert_eq!(notice, Notice::Error("Invalid phone number".into()));
        assert_eq!(form.number, "123");
    }

    #[tokio::test]
    async fn backend_lists_feed_the_forms() {
        let api = StubApi::default();
        api.set_numbers(numbers());
        api.set_personas(&["Sales Recruiter", "Collections"]);

        let mut call = MakeCallForm::default();
        call.apply_numbers(&api.phone_numbers().await.unwrap());
        assert_eq!(call.from_number, "+911111");

        let mut persona = PersonaForm::default();
        persona.load(api.personas().await.unwrap());
        assert_eq!(persona.personas.len(), 3);
        assert_eq!(persona.selected, "Sales Recruiter");
    }

    #[test]
    fn first_number_is_preselected() {
        let mut form = MakeCallForm::default();
        form.apply_numbers(&numbers());
        assert_eq!(form.from_number, "+911111");
        form.apply_numbers(&[]);
        assert_eq!(form.from_number, "+911111");
    }

    #[test]
    fn persona_list_gains_manual_entry_once() {
        let mut form = PersonaForm::default();
        form.load(vec!["Sales Recruiter".into()]);
        assert_eq!(form.personas, vec!["Sales Recruiter", MANUAL_ENTRY]);
        assert_eq!(form.selected, "Sales Recruiter");

        form.load(vec![MANUAL_ENTRY.into(), "Collections".into()]);
        assert_eq!(form.personas.len(), 2);
        assert!(form.is_manual());

        form.load(Vec::new());
        assert_eq!(form.personas, vec![MANUAL_ENTRY]);
    }

    #[test]
    fn leaving_manual_entry_clears_custom_fields() {
        let mut form = PersonaForm::default();
        form.load(vec!["Sales Recruiter".into()]);
        form.select(MANUAL_ENTRY);
        form.description = "desc".into();
        form.prompt_text = "prompt".into();
        form.select("Sales Recruiter");
        assert!(form.description.is_empty() && form.prompt_text.is_empty());
    }

    #[tokio::test]
    async fn manual_entry_without_prompt_is_rejected_locally() {
        let api = StubApi::default();
        let mut form = PersonaForm::default();
        form.load(vec!["Sales Recruiter".into()]);
        form.select(MANUAL_ENTRY);

        let notice = form.submit(&api).await;

        assert_eq!(
            notice,
            Notice::Error("Prompt text is required for Manual Entry persona".into())
        );
        assert_eq!(api.request_count(), 0);
    }

    #[tokio::test]
    async fn manual_entry_sends_prompt_and_description() {
        let api = StubApi::default();
        let mut form = PersonaForm::default();
        form.load(Vec::new());
        form.prompt_text = "Greet ${params.customerName}".into();
        form.description = "Hindi speaking".into();

        let notice = form.submit(&api).await;

        assert!(notice.is_success());
        let sent = api.persona_requests.lock().unwrap();
        assert_eq!(
            sent[0],
            SetPersonaRequest {
                persona: MANUAL_ENTRY.into(),
                prompt_text: Some("Greet ${params.customerName}".into()),
                description: Some("Hindi speaking".into()),
            }
        );
    }

    #[test]
    fn manual_entry_description_defaults() {
        let mut form = PersonaForm::default();
        form.load(Vec::new());
        form.prompt_text = "p".into();
        let request = form.validate().expect("valid");
        assert_eq!(request.description.as_deref(), Some(DEFAULT_MANUAL_DESCRIPTION));
    }

    #[test]
    fn persona_outcome_falls_back_when_backend_is_silent() {
        let ok = PersonaForm::outcome(&Ok(MessageResponse { message: None }));
        assert_eq!(ok, Notice::Success("Persona set successfully".into()));
        let err = PersonaForm::outcome(&Err(ApiError::Status {
            status: 500,
            message: None,
        }));
        assert_eq!(
            err,
            Notice::Error("Failed to set persona. Please try again.".into())
        );
    }

    #[tokio::test]
    async fn upload_without_selection_is_rejected() {
        let api = StubApi::default();
        assert_eq!(
            upload_candidates(&api, None).await,
            Notice::Error("Please select a CSV file to upload".into())
        );
        assert_eq!(
            upload_cvs(&api, Vec::new()).await,
            Notice::Error("Please select at least one CV file to upload".into())
        );
        assert_eq!(api.request_count(), 0);
    }

    #[tokio::test]
    async fn csv_upload_reports_row_count() {
        let api = StubApi::default();
        let csv = "Name,Location,Product,Designation,Phone Number,CV\n\
                   A,Delhi,Home loans,Sales Executive,9190,a.pdf\n\
                   B,Pune,Gold loans,Sales Executive,9191,b.pdf\n\
                   C,Agra,Home loans,Team Lead,9192,c.pdf\n";
        let file = UploadFile::new("candidates.csv", csv.as_bytes().to_vec());
        assert_eq!(
            upload_candidates(&api, Some(file)).await,
            Notice::Success("Successfully uploaded 3 candidates".into())
        );
        assert_eq!(api.uploads.lock().unwrap()[0].file_name, "candidates.csv");
    }

    #[tokio::test]
    async fn cv_upload_reports_file_count() {
        let api = StubApi::default();
        let files = vec![
            UploadFile::new("a.pdf", vec![1]),
            UploadFile::new("b.docx", vec![2]),
        ];
        assert_eq!(
            upload_cvs(&api, files).await,
            Notice::Success("Successfully uploaded 2 CV files".into())
        );
    }

    #[tokio::test]
    async fn auto_trigger_surfaces_backend_error_verbatim() {
        let api = StubApi::default();
        api.fail_next(404, Some("No pending candidates"));
        let result = api.auto_trigger_call().await;
        assert_eq!(
            auto_trigger_outcome(&result),
            Notice::Error("No pending candidates".into())
        );
    }

    #[tokio::test]
    async fn end_call_requires_sid() {
        let api = StubApi::default();
        assert_eq!(
            end_call(&api, "  ").await,
            Notice::Error("Call SID is required".into())
        );
        assert_eq!(end_call(&api, "CA1").await, Notice::Success("Call CA1 ended".into()));
    }
}
