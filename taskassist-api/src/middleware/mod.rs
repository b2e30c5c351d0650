/// HTTP middleware for the API server
///
/// - `security`: Response headers following OWASP recommendations

pub mod security;
