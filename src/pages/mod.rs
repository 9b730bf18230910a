pub mod confirmation;
pub mod court_detail;
pub mod court_row;
pub mod court_table;
pub mod date_picker;
pub mod home;
pub mod my_reviews;
pub mod payment;
pub mod receipt;
pub mod slot_picker;
