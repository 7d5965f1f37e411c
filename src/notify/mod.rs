// 留言通知
// 新留言写库后通过 SMTP 异步发送邮件，失败只记录日志

use std::sync::Arc;

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::routes::contact::Contact;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("invalid mailbox: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build email: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("smtp error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

type Mailer = AsyncSmtpTransport<Tokio1Executor>;

#[derive(Clone)]
pub struct Notifier {
    mailer: Option<Arc<Mailer>>,
    from: Option<String>,
    target: Option<String>,
}

impl Notifier {
    pub fn from_config(config: &Config) -> Self {
        let mailer = match (&config.email_from, &config.email_password) {
            (Some(user), Some(password)) => match build_mailer(config, user, password) {
                Ok(mailer) => Some(Arc::new(mailer)),
                Err(e) => {
                    warn!(host = %config.smtp_host, error = %e, "Failed to configure SMTP transport");
                    None
                }
            },
            _ => None,
        };

        Self {
            mailer,
            from: config.email_from.clone(),
            target: config.email_target.clone(),
        }
    }

    /// 未配置发件人或收件人时返回 `None`
    pub fn contact_message(&self, contact: &Contact) -> Result<Option<Message>, NotifyError> {
        let (Some(from), Some(to)) = (&self.from, &self.target) else {
            return Ok(None);
        };

        let message = Message::builder()
            .from(from.parse::<Mailbox>()?)
            .to(to.parse::<Mailbox>()?)
            .subject(contact.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(contact_body(contact))?;
        Ok(Some(message))
    }

    /// 在后台任务中投递，不阻塞请求
    pub fn notify_contact(&self, contact: &Contact) {
        let message = match self.contact_message(contact) {
            Ok(Some(message)) => message,
            Ok(None) => {
                warn!("EMAIL_FROM or EMAIL_TARGET not set, contact notification skipped");
                return;
            }
            Err(e) => {
                error!(error = %e, "Failed to build contact email");
                return;
            }
        };
        let Some(mailer) = self.mailer.clone() else {
            info!(
                subject = %contact.subject,
                "EMAIL_PASSWORD not set, contact notification skipped"
            );
            return;
        };

        let to = self.target.clone().unwrap_or_default();
        let subject = contact.subject.clone();
        tokio::spawn(async move {
            info!(to = %to, subject = %subject, "Sending email");
            match mailer.send(message).await {
                Ok(_) => info!(to = %to, "Email sent"),
                Err(e) => error!(to = %to, error = %e, "Failed to send email"),
            }
        });
    }
}

// STARTTLS 连接，发件人同时作为登录账号
fn build_mailer(config: &Config, user: &str, password: &str) -> Result<Mailer, NotifyError> {
    let mailer = Mailer::starttls_relay(&config.smtp_host)?
        .port(config.smtp_port)
        .credentials(Credentials::new(user.to_string(), password.to_string()))
        .build();
    Ok(mailer)
}

pub fn contact_body(contact: &Contact) -> String {
    format!(
        "Hi,\n\n\
         You received a new message from a Portfolio Website visitor:\n\n\
         Name: {}\n\
         Email: {}\n\
         Message: {}\n\n\
         Thank you.",
        contact.name, contact.email, contact.message
    )
}
