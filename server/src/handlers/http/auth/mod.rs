pub mod login;
pub mod register;

// Re-export main handlers
pub use login::handle_sign_in;
pub use register::handle_sign_up;
