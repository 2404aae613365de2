mod question_test;
mod report_test;
