pub mod email;
pub mod form;
pub mod serve;
pub mod submit;
