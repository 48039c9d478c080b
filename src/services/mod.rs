pub mod beatport;
pub mod chromium;
