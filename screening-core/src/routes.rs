//! Static route table of the dashboard.

use std::fmt::Write;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    MakeCall,
    BulkUpload,
    BulkRecords,
    BulkRecord(String),
    Interviews,
    Interview(String),
    Personas,
    NotFound,
}

impl Route {
    /// Maps a location path to its view. Trailing slashes are ignored.
    pub fn parse(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Home,
            ["make-call"] => Route::MakeCall,
            ["bulk-upload"] => Route::BulkUpload,
            ["bulk-records"] => Route::BulkRecords,
            ["bulk-records", id] => Route::BulkRecord(decode(id)),
            ["interviews"] => Route::Interviews,
            ["interviews", sid] => Route::Interview(decode(sid)),
            ["personas"] => Route::Personas,
            _ => Route::NotFound,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".into(),
            Route::MakeCall => "/make-call".into(),
            Route::BulkUpload => "/bulk-upload".into(),
            Route::BulkRecords => "/bulk-records".into(),
            Route::BulkRecord(id) => format!("/bulk-records/{}", encode(id)),
            Route::Interviews => "/interviews".into(),
            Route::Interview(sid) => format!("/interviews/{}", encode(sid)),
            Route::Personas => "/personas".into(),
            Route::NotFound => "/404".into(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Dashboard",
            Route::MakeCall => "Make Call",
            Route::BulkUpload => "Bulk Upload",
            Route::BulkRecords => "Bulk Records",
            Route::BulkRecord(_) => "Bulk Record Details",
            Route::Interviews => "Interviews",
            Route::Interview(_) => "Interview Details",
            Route::Personas => "Persona Settings",
            Route::NotFound => "Page Not Found",
        }
    }
}

/// Top navigation bar entries.
pub const NAV: [Route; 6] = [
    Route::MakeCall,
    Route::BulkUpload,
    Route::BulkRecords,
    Route::Interviews,
    Route::Personas,
    Route::Home,
];

pub struct HomeCard {
    pub route: Route,
    pub title: &'static str,
    pub blurb: &'static str,
    pub action: &'static str,
}

pub fn home_cards() -> [HomeCard; 6] {
    [
        HomeCard {
            route: Route::MakeCall,
            title: "Make Call",
            blurb: "Place a screening call to a single candidate.",
            action: "Make a Call",
        },
        HomeCard {
            route: Route::BulkUpload,
            title: "Bulk Upload",
            blurb: "Import candidates from CSV and attach their CVs.",
            action: "Upload Candidates",
        },
        HomeCard {
            route: Route::BulkRecords,
            title: "Bulk Records",
            blurb: "Review imported candidates and trigger the next call.",
            action: "View Records",
        },
        HomeCard {
            route: Route::Interviews,
            title: "Interviews",
            blurb: "Browse screening calls and their results.",
            action: "View Interviews",
        },
        HomeCard {
            route: Route::Personas,
            title: "Persona Settings",
            blurb: "Choose the persona the interviewer uses on calls.",
            action: "Configure Persona",
        },
        HomeCard {
            route: Route::Interviews,
            title: "Transcripts & Analysis",
            blurb: "Open an interview to read, play and export its results.",
            action: "Browse Results",
        },
    ]
}

// Everything outside the unreserved set is escaped byte-wise, so UTF-8 ids
// survive the trip through the address bar.
fn encode(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for b in segment.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~') {
            out.push(char::from(b));
        } else {
            let _ = write!(out, "%{b:02X}");
        }
    }
    out
}

/// Decodes every `%XX` escape, either case. Malformed escapes pass through.
fn decode(segment: &str) -> String {
    let bytes = segment.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex(bytes[i + 1]), hex(bytes[i + 2])) {
                out.push(hi << 4 | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex(b: u8) -> Option<u8> {
    char::from(b).to_digit(16).and_then(|d| u8::try_from(d).ok())
}
