//! SMTP channel connector

use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use clap::Parser;
use lettre::{
    message::{
        header::ContentType, Attachment as MimeAttachment, Mailbox, MultiPart, MultiPartBuilder,
        SinglePart,
    },
    transport::smtp::{
        authentication::Credentials,
        client::{Certificate, Tls, TlsParameters},
    },
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tokio::fs;
use tracing::debug;

use crate::domain::{
    dispatcher::{ChannelConnector, DeliveryError, OutboundMessage},
    mail::{Attachment, InlineImage, MailAddress, MessageBody},
    transport::{Encryption, TlsPolicy, TransportConfig},
};

/// SMTP connector configuration
#[derive(Clone, Debug, Parser)]
pub struct SmtpConnectorConfig {
    /// Seconds to wait on the SMTP server before giving up
    #[arg(long, env = "SMTP_TIMEOUT", default_value = "30")]
    pub timeout_secs: u64,
}

/// Delivers messages over SMTP with lettre
#[derive(Debug, Clone)]
pub struct SmtpConnector {
    timeout: Duration,
}

impl Default for SmtpConnector {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

enum BodyPart {
    Single(SinglePart),
    Multi(MultiPart),
}

impl SmtpConnector {
    /// Create a new SMTP connector
    pub fn new(config: SmtpConnectorConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Builds a transport for the host, port, credentials and TLS settings in `config`
    pub async fn build_transport(
        &self,
        config: &TransportConfig,
    ) -> Result<AsyncSmtpTransport<Tokio1Executor>, DeliveryError> {
        if config.host.is_empty() {
            return Err(DeliveryError::Transport(anyhow!("no SMTP host configured")));
        }

        let tls = match &config.encryption {
            Encryption::None => Tls::None,
            Encryption::ImplicitTls(policy) => Tls::Wrapper(tls_parameters(&config.host, policy).await?),
            Encryption::StartTls(policy) => Tls::Required(tls_parameters(&config.host, policy).await?),
        };

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
            .port(config.port)
            .tls(tls)
            .timeout(Some(self.timeout));

        if let Some((username, password)) = config.credentials() {
            builder = builder.credentials(Credentials::new(
                username.to_string(),
                password.to_string(),
            ));
        }

        Ok(builder.build())
    }

    /// Encodes `message` as a MIME message
    pub fn build_message(&self, message: &OutboundMessage) -> Result<Message, DeliveryError> {
        let mut builder = Message::builder()
            .message_id(Some(message.message_id.header_value()))
            .from(mailbox(&message.from)?)
            .subject(message.subject.clone());

        if let Some(reply_to) = &message.reply_to {
            builder = builder.reply_to(mailbox(reply_to)?);
        }

        for to in &message.to {
            builder = builder.to(mailbox(to)?);
        }

        for bcc in &message.bcc {
            builder = builder.bcc(mailbox(bcc)?);
        }

        let body = body_part(&message.body);
        let body = with_inline_images(body, &message.inline_images)?;
        let body = with_attachments(body, &message.attachments)?;

        match body {
            BodyPart::Single(part) => builder.singlepart(part),
            BodyPart::Multi(part) => builder.multipart(part),
        }
        .map_err(|e| DeliveryError::InvalidMessage(e.to_string()))
    }
}

#[async_trait]
impl ChannelConnector for SmtpConnector {
    #[mutants::skip]
    async fn deliver(
        &self,
        config: &TransportConfig,
        message: &OutboundMessage,
    ) -> Result<(), DeliveryError> {
        let email = self.build_message(message)?;
        let transport = self.build_transport(config).await?;

        debug!(
            host = %config.host,
            port = config.port,
            encryption = %config.encryption.mode(),
            message_id = %message.message_id,
            "sending over SMTP"
        );

        transport
            .send(email)
            .await
            .map_err(|e| DeliveryError::Transport(e.into()))?;

        Ok(())
    }
}

async fn tls_parameters(host: &str, policy: &TlsPolicy) -> Result<TlsParameters, DeliveryError> {
    let domain = policy
        .peer_name
        .clone()
        .unwrap_or_else(|| host.to_string());

    let mut builder = TlsParameters::builder(domain)
        .dangerous_accept_invalid_certs(!policy.verify_peer || policy.allow_self_signed)
        .dangerous_accept_invalid_hostnames(!policy.verify_peer_name);

    if let Some(path) = &policy.ca_file {
        let pem = fs::read(path).await.map_err(|e| {
            DeliveryError::Tls(format!("could not read CA file {}: {e}", path.display()))
        })?;

        let certificate =
            Certificate::from_pem(&pem).map_err(|e| DeliveryError::Tls(e.to_string()))?;

        builder = builder.add_root_certificate(certificate);
    }

    builder.build().map_err(|e| DeliveryError::Tls(e.to_string()))
}

fn mailbox(address: &MailAddress) -> Result<Mailbox, DeliveryError> {
    let email = address
        .email
        .as_str()
        .parse::<Address>()
        .map_err(|e| DeliveryError::InvalidAddress(format!("{}: {e}", address.email)))?;

    Ok(Mailbox::new(address.name.clone(), email))
}

fn body_part(body: &MessageBody) -> BodyPart {
    match body {
        MessageBody::Html {
            html,
            alternative: Some(text),
        } => BodyPart::Multi(MultiPart::alternative_plain_html(text.clone(), html.clone())),
        MessageBody::Html {
            html,
            alternative: None,
        } => BodyPart::Single(SinglePart::html(html.clone())),
        MessageBody::Plain(text) => BodyPart::Single(SinglePart::plain(text.clone())),
        MessageBody::Empty => BodyPart::Single(SinglePart::plain(String::new())),
    }
}

fn nest(builder: MultiPartBuilder, part: BodyPart) -> MultiPart {
    match part {
        BodyPart::Single(part) => builder.singlepart(part),
        BodyPart::Multi(part) => builder.multipart(part),
    }
}

fn content_type(value: &str) -> Result<ContentType, DeliveryError> {
    ContentType::parse(value)
        .map_err(|e| DeliveryError::InvalidMessage(format!("content type \"{value}\": {e}")))
}

fn with_inline_images(body: BodyPart, images: &[InlineImage]) -> Result<BodyPart, DeliveryError> {
    if images.is_empty() {
        return Ok(body);
    }

    let mut related = nest(MultiPart::related(), body);

    for image in images {
        related = related.singlepart(
            MimeAttachment::new_inline(image.content_id.clone())
                .body(image.content.clone(), content_type(image.content_type())?),
        );
    }

    Ok(BodyPart::Multi(related))
}

fn with_attachments(body: BodyPart, attachments: &[Attachment]) -> Result<BodyPart, DeliveryError> {
    if attachments.is_empty() {
        return Ok(body);
    }

    let mut mixed = nest(MultiPart::mixed(), body);

    for attachment in attachments {
        mixed = mixed.singlepart(
            MimeAttachment::new(attachment.name.clone())
                .body(attachment.content.clone(), content_type(attachment.content_type())?),
        );
    }

    Ok(BodyPart::Multi(mixed))
}
