pub mod question_service;
pub mod report_service;
pub mod subtag_service;
