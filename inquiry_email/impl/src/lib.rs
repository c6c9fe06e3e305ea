use anyhow::{anyhow, ensure};
use inquiry_email_contracts::{Email, EmailBody, EmailService};
use inquiry_models::email_address::EmailAddressWithName;
use inquiry_utils::Apply;
use lettre::{
    message::{header, MessageBuilder, MultiPart},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    from: EmailAddressWithName,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailServiceImpl {
    pub async fn new(url: &str, from: EmailAddressWithName) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(url)?.build();

        Ok(Self { from, transport })
    }
}

impl EmailService for EmailServiceImpl {
    async fn send(&self, email: Email) -> anyhow::Result<bool> {
        let message = build_message(&self.from, email)?;
        debug!(recipients = ?message.envelope().to(), "sending email");

        match self.transport.send(message).await {
            Ok(response) => Ok(response.is_positive()),
            Err(err) if err.is_permanent() || err.is_transient() => {
                warn!("smtp server rejected email: {err}");
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.transport
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}

fn build_message(from: &EmailAddressWithName, email: Email) -> anyhow::Result<Message> {
    ensure!(!email.recipients.is_empty(), "Email has no recipients");

    let builder = Message::builder()
        .from(from.as_mailbox().clone())
        .apply_each(
            email.recipients.into_iter().map(|recipient| recipient.0),
            MessageBuilder::to,
        )
        .apply_map(email.reply_to.map(|x| x.0), MessageBuilder::reply_to)
        .subject(email.subject);

    let message = match email.body {
        EmailBody::Text(body) => builder.header(header::ContentType::TEXT_PLAIN).body(body),
        EmailBody::Html(body) => builder.header(header::ContentType::TEXT_HTML).body(body),
        EmailBody::Alternative { text, html } => {
            builder.multipart(MultiPart::alternative_plain_html(text, html))
        }
    }?;

    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from() -> EmailAddressWithName {
        "Contact Form <noreply@example.com>".parse().unwrap()
    }

    fn email(body: EmailBody) -> Email {
        Email {
            recipients: vec![
                "info@example.com".parse().unwrap(),
                "Enquiries <enquiries@example.com>".parse().unwrap(),
            ],
            subject: "The Subject".into(),
            body,
            reply_to: Some("john@example.com".parse().unwrap()),
        }
    }

    #[test]
    fn text_message() {
        let message = build_message(&from(), email(EmailBody::Text("Hello World!".into()))).unwrap();

        let envelope = message.envelope();
        assert_eq!(
            envelope.from().map(|x| x.to_string()).as_deref(),
            Some("noreply@example.com")
        );
        let to = envelope.to().iter().map(ToString::to_string).collect::<Vec<_>>();
        assert_eq!(to, ["info@example.com", "enquiries@example.com"]);

        let formatted = String::from_utf8(message.formatted()).unwrap();
        assert!(formatted.contains("Subject: The Subject"));
        assert!(formatted.contains("Reply-To: john@example.com"));
        assert!(formatted.contains("Content-Type: text/plain"));
        assert!(formatted.contains("Hello World!"));
    }

    #[test]
    fn alternative_message() {
        let message = build_message(
            &from(),
            email(EmailBody::Alternative {
                text: "Hello World!".into(),
                html: "<h1>Hello World!</h1>".into(),
            }),
        )
        .unwrap();

        let formatted = String::from_utf8(message.formatted()).unwrap();
        assert!(formatted.contains("multipart/alternative"));
        assert!(formatted.contains("Content-Type: text/plain"));
        assert!(formatted.contains("Content-Type: text/html"));
        assert!(formatted.contains("<h1>Hello World!</h1>"));
    }

    #[test]
    fn no_reply_to() {
        let message = build_message(
            &from(),
            Email {
                reply_to: None,
                ..email(EmailBody::Html("<p>Hi</p>".into()))
            },
        )
        .unwrap();

        let formatted = String::from_utf8(message.formatted()).unwrap();
        assert!(!formatted.contains("Reply-To"));
        assert!(formatted.contains("Content-Type: text/html"));
    }

    #[test]
    fn no_recipients() {
        let result = build_message(
            &from(),
            Email {
                recipients: vec![],
                ..email(EmailBody::Text("Hello World!".into()))
            },
        );

        assert!(result.is_err());
    }

    /// Minimal SMTP server that accepts the session but refuses every
    /// recipient.
    async fn spawn_rejecting_smtp_server() -> String {
        use tokio::{
            io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
            net::TcpListener,
        };

        let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let (read, mut write) = stream.into_split();
                    let mut lines = BufReader::new(read).lines();
                    write.write_all(b"220 localhost ESMTP\r\n").await?;
                    while let Some(line) = lines.next_line().await? {
                        let command = line.to_ascii_uppercase();
                        let reply: &[u8] = if command.starts_with("RCPT") {
                            b"550 mailbox unavailable\r\n"
                        } else if command.starts_with("QUIT") {
                            b"221 bye\r\n"
                        } else {
                            b"250 OK\r\n"
                        };
                        write.write_all(reply).await?;
                    }
                    std::io::Result::Ok(())
                });
            }
        });

        format!("smtp://{addr}")
    }

    #[tokio::test]
    async fn rejected_by_smtp_server() {
        // Arrange
        let url = spawn_rejecting_smtp_server().await;
        let sut = EmailServiceImpl::new(&url, from()).await.unwrap();

        // Act
        let result = sut.send(email(EmailBody::Text("Hello World!".into()))).await;

        // Assert
        assert!(!result.unwrap());
    }

    #[tokio::test]
    async fn smtp_server_unreachable() {
        // Arrange
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let sut = EmailServiceImpl::new(&format!("smtp://{addr}"), from())
            .await
            .unwrap();

        // Act
        let result = sut.send(email(EmailBody::Text("Hello World!".into()))).await;

        // Assert
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn invalid_smtp_url() {
        let result = EmailServiceImpl::new("not a url", from()).await;

        assert!(result.is_err());
    }
}
