mod http;

pub mod contact;
