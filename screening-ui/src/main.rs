mod app;
mod bridge;
mod components;
mod download;
mod nav;

pub mod pages {
    pub mod bulk_record_detail;
    pub mod bulk_records;
    pub mod bulk_upload;
    pub mod home;
    pub mod interview_detail;
    pub mod interviews;
    pub mod make_call;
    pub mod personas;
}

fn main() {
    leptos::mount_to_body(app::App);
}
