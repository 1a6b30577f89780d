use validator::ValidateEmail;

/// An email address that passed the same format check a browser's
/// `type="email"` input performs. The form refuses to submit anything else.
#[derive(Debug, Clone)]
pub struct SubscriberEmail(String);

impl SubscriberEmail {
    pub fn parse(email: String) -> Result<Self, String> {
        let trimmed = email.trim().to_string();
        if trimmed.is_empty() {
            return Err("Please enter an email address".to_string());
        }
        ValidateEmail::validate_email(&trimmed)
            .then_some(Self(trimmed))
            .ok_or(format!("Invalid email: {email}"))
    }
}

impl AsRef<str> for SubscriberEmail {
    fn as_ref(&self) -> &str { &self.0 }
}

impl std::fmt::Display for SubscriberEmail {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
