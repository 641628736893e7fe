//! Outbound email.
//!
//! SMTP transport via lettre. Mail here is best-effort notification
//! plumbing: callers decide whether a send failure fails the request.

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::header::ContentType,
    transport::smtp::authentication::Credentials,
};
use wayfare_common::{AppError, AppResult, config::EmailConfig};

/// SMTP mailer.
#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
    server_url: String,
}

impl Mailer {
    /// Build a mailer from SMTP configuration.
    pub fn new(config: &EmailConfig, server_url: String) -> AppResult<Self> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| AppError::Config(format!("Invalid SMTP host: {e}")))?
            .port(config.port);

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from_address: config.from_address.clone(),
            server_url,
        })
    }

    /// Send a password-reset link.
    pub async fn send_password_reset(&self, to: &str, token: &str) -> AppResult<()> {
        let link = format!("{}/reset-password?token={token}", self.server_url);
        let body = format!(
            "A password reset was requested for your account.\n\n\
             Reset it here: {link}\n\n\
             If you did not request this, you can ignore this mail."
        );

        self.send(to, "Reset your password", body).await
    }

    /// Send an email-verification link.
    pub async fn send_verification(&self, to: &str, token: &str) -> AppResult<()> {
        let link = format!("{}/verify-email?token={token}", self.server_url);
        let body = format!("Welcome! Verify your email address here: {link}");

        self.send(to, "Verify your email", body).await
    }

    async fn send(&self, to: &str, subject: &str, body: String) -> AppResult<()> {
        let message = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|e| AppError::Config(format!("Invalid from address: {e}")))?,
            )
            .to(to
                .parse()
                .map_err(|e| AppError::Validation(format!("Invalid recipient: {e}")))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| AppError::Internal(format!("Failed to build mail: {e}")))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| AppError::ExternalService(format!("SMTP send failed: {e}")))?;

        tracing::debug!(to = %to, subject = %subject, "Mail sent");
        Ok(())
    }
}
