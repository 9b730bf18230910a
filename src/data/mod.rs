pub mod booking;
pub mod calendar;
pub mod courts;
pub mod payment;
pub mod reviews;
pub mod selection;
pub mod shared_booking;
