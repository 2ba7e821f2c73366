pub mod contact;
pub mod report_comment;
