pub mod question;
pub mod report;
pub mod subtag;
