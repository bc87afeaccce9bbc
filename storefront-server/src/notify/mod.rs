//! 订单确认通知
//!
//! `Confirmed` 状态迁移触发一封模板邮件。发送是 fire-and-forget：
//! 从调用方视角看永远成功，投递失败只写日志 — 没有重试，没有
//! 死信队列，没有投递跟踪。
//!
//! SMTP 配置缺省时通知整体关闭 (debug 日志提示)。

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::core::Config;

struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: lettre::message::Mailbox,
}

/// Fire-and-forget email dispatch
pub struct EmailNotifier {
    inner: Option<Mailer>,
}

impl EmailNotifier {
    /// Build from config; any missing SMTP setting disables the notifier
    pub fn from_config(config: &Config) -> Self {
        let (Some(host), Some(user), Some(pass)) = (
            config.smtp_host.as_deref(),
            config.smtp_user.as_deref(),
            config.smtp_pass.as_deref(),
        ) else {
            tracing::debug!("SMTP settings absent, email notifications disabled");
            return Self::disabled();
        };

        let from_addr = config.mail_from.as_deref().unwrap_or(user);
        let from = match from_addr.parse::<lettre::message::Mailbox>() {
            Ok(mbox) => mbox,
            Err(e) => {
                tracing::warn!(error = %e, from = %from_addr, "Invalid MAIL_FROM, email notifications disabled");
                return Self::disabled();
            }
        };

        let transport = match AsyncSmtpTransport::<Tokio1Executor>::relay(host) {
            Ok(builder) => builder
                .credentials(Credentials::new(user.to_string(), pass.to_string()))
                .build(),
            Err(e) => {
                tracing::warn!(error = %e, host = %host, "Invalid SMTP relay, email notifications disabled");
                return Self::disabled();
            }
        };

        Self {
            inner: Some(Mailer { transport, from }),
        }
    }

    pub fn disabled() -> Self {
        Self { inner: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// Dispatch the order-confirmed email on a spawned task.
    ///
    /// Returns immediately; the send outcome is only ever logged.
    pub fn notify_confirmed(&self, to: &str, order_id: i64, total: f64) {
        let Some(mailer) = &self.inner else {
            tracing::debug!(order_id, "Email notifications disabled, skipping confirmation mail");
            return;
        };

        let mailbox = match to.parse::<lettre::message::Mailbox>() {
            Ok(mbox) => mbox,
            Err(e) => {
                // Guest orders carry a sentinel instead of an address
                tracing::debug!(error = %e, to = %to, order_id, "Recipient is not a mailable address, skipping");
                return;
            }
        };

        let message = Message::builder()
            .from(mailer.from.clone())
            .to(mailbox)
            .subject(format!("✅ Order #{order_id} Confirmed!"))
            .header(ContentType::TEXT_HTML)
            .body(format!(
                "<h2>Order #{order_id} Confirmed</h2>\
                 <p>Your order for ₹{total} has been approved!</p>"
            ));

        let message = match message {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!(error = %e, order_id, "Failed to build confirmation email");
                return;
            }
        };

        let transport = mailer.transport.clone();
        tokio::spawn(async move {
            match transport.send(message).await {
                Ok(_) => tracing::info!(order_id, "Confirmation email sent"),
                Err(e) => tracing::error!(error = %e, order_id, "Email Error"),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;

    #[test]
    fn notifier_disabled_without_smtp_settings() {
        let mut config = Config::with_overrides("/tmp", 0);
        config.smtp_host = None;
        config.smtp_user = None;
        config.smtp_pass = None;

        let notifier = EmailNotifier::from_config(&config);
        assert!(!notifier.is_enabled());
    }

    #[tokio::test]
    async fn disabled_notifier_swallows_calls() {
        let notifier = EmailNotifier::disabled();
        // Must not panic or spawn anything
        notifier.notify_confirmed("guest", 1, 100.0);
        notifier.notify_confirmed("a@example.com", 2, 100.0);
    }
}
