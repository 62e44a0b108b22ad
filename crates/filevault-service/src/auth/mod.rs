//! Authentication: registration, login, and token refresh.

pub mod service;

pub use service::{AuthService, LoginRequest, LoginResponse, RefreshResponse, RegisterRequest};
