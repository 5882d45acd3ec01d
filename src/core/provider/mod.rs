pub mod http_session;
pub mod session;
