//! API endpoint handlers, grouped by area

pub(crate) mod advice;
pub(crate) mod info;
pub(crate) mod readings;
