//! Mail dispatcher

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

#[cfg(test)]
use mockall::mock;

use crate::domain::{
    config::ConfigProvider,
    mail::{errors::MailError, message_host, MessageBody, MessageId, SendRequest},
    transport::{MailMethod, TransportConfig},
};

use super::{ChannelConnector, OutboundMessage};

/// Sends fully specified messages
#[async_trait]
pub trait MailDispatcher: Clone + Send + Sync + 'static {
    /// Sends a message using the transport configured for its tenant.
    ///
    /// # Arguments
    /// * `request` - The [`SendRequest`] to deliver.
    ///
    /// # Returns
    /// [`Ok`] once the channel accepted the message (or mail is disabled for the
    /// tenant), or a [`MailError`] carrying the underlying cause.
    async fn send(&self, request: SendRequest) -> Result<(), MailError>;
}

#[cfg(test)]
mock! {
    pub MailDispatcher {}

    impl Clone for MailDispatcher {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl MailDispatcher for MailDispatcher {
        async fn send(&self, request: SendRequest) -> Result<(), MailError>;
    }
}

/// Dispatcher reading its configuration fresh on every send
#[derive(Debug, Clone)]
pub struct MailDispatcherImpl<P, C>
where
    P: ConfigProvider,
    C: ChannelConnector,
{
    config: Arc<P>,
    connector: Arc<C>,
    host: String,
}

impl<P, C> MailDispatcherImpl<P, C>
where
    P: ConfigProvider,
    C: ChannelConnector,
{
    /// Creates a new dispatcher.
    ///
    /// `server_name` becomes the host part of generated Message-IDs; the local
    /// machine name is used when it is [`None`].
    pub fn new(config: Arc<P>, connector: Arc<C>, server_name: Option<String>) -> Self {
        Self {
            config,
            connector,
            host: message_host(server_name.as_deref()),
        }
    }

    /// Builds the transport-neutral message for `request`
    pub fn assemble(&self, request: SendRequest) -> OutboundMessage {
        OutboundMessage {
            message_id: MessageId::generate(&self.host),
            body: MessageBody::select(&request.templates),
            from: request.from,
            reply_to: request.reply_to,
            to: request.to,
            bcc: request.bcc,
            subject: request.subject,
            inline_images: request.inline_images,
            attachments: request.attachments,
        }
    }
}

#[async_trait]
impl<P, C> MailDispatcher for MailDispatcherImpl<P, C>
where
    P: ConfigProvider,
    C: ChannelConnector,
{
    async fn send(&self, request: SendRequest) -> Result<(), MailError> {
        let tenant_id = request.tenant_id;
        let locale_id = request.locale_id;

        let config = TransportConfig::resolve(self.config.as_ref(), tenant_id).await?;

        if config.method == MailMethod::Disabled {
            info!(%tenant_id, subject = %request.subject, "mail disabled, message dropped");

            return Ok(());
        }

        let message = self.assemble(request);

        debug!(
            %tenant_id,
            %locale_id,
            message_id = %message.message_id,
            recipients = message.to.len(),
            bcc = message.bcc.len(),
            html = message.body.is_html(),
            inline_images = message.inline_images.len(),
            attachments = message.attachments.len(),
            "message assembled"
        );

        self.connector.deliver(&config, &message).await?;

        info!(
            %tenant_id,
            message_id = %message.message_id,
            host = %config.host,
            port = config.port,
            "message delivered"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, path::PathBuf};

    use anyhow::anyhow;
    use testresult::TestResult;

    use crate::domain::{
        config::{tests::MockConfigProvider, ConfigError, TenantId},
        dispatcher::{tests::MockChannelConnector, DeliveryError},
        mail::{Attachment, InlineImage, MailAddress, RenderedTemplate},
        transport::{keys, Encryption, EncryptionMode, TlsPolicy},
    };

    use super::*;

    fn provider(values: &[(&str, &str)]) -> MockConfigProvider {
        let values: HashMap<String, String> = values
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        let mut provider = MockConfigProvider::new();

        provider
            .expect_get()
            .returning(move |key, _| Ok(values.get(key).cloned()));

        provider
    }

    fn request(templates: Vec<RenderedTemplate>) -> Result<SendRequest, anyhow::Error> {
        let mut request = SendRequest::new(
            TenantId(1),
            MailAddress::parse("a@x.com", Some("A"))?,
            vec![MailAddress::parse("b@x.com", Some("B"))?],
            "Hi",
        );
        request.templates = templates;

        Ok(request)
    }

    #[tokio::test]
    async fn test_send_starttls_html_message() -> TestResult {
        let config = provider(&[
            (keys::MAIL_SERVER, "smtp.example.com"),
            (keys::MAIL_SMTP_PORT, "587"),
            (keys::MAIL_SMTP_ENCRYPTION, "tls"),
            (keys::MAIL_USER, "bot"),
            (keys::SSL_VERIFY_PEER, "1"),
        ]);

        let mut connector = MockChannelConnector::new();

        connector
            .expect_deliver()
            .times(1)
            .withf(|config, message| {
                config.host == "smtp.example.com"
                    && config.port == 587
                    && config.encryption == Encryption::StartTls(TlsPolicy::default())
                    && message.body.is_html()
                    && message.body.primary() == "<p>Hi</p>"
                    && message.subject == "Hi"
                    && message.to[0].email.as_str() == "b@x.com"
            })
            .returning(|_, _| Ok(()));

        let dispatcher = MailDispatcherImpl::new(Arc::new(config), Arc::new(connector), None);

        dispatcher
            .send(request(vec![RenderedTemplate::html("<p>Hi</p>")])?)
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_bogus_encryption_sends_in_plaintext() -> TestResult {
        let config = provider(&[
            (keys::MAIL_SERVER, "smtp.example.com"),
            (keys::MAIL_SMTP_ENCRYPTION, "bogus"),
        ]);

        let mut connector = MockChannelConnector::new();

        connector
            .expect_deliver()
            .times(1)
            .withf(|config, _| {
                config.encryption.mode() == EncryptionMode::None
                    && config.encryption.tls_policy().is_none()
                    && config.port == 25
            })
            .returning(|_, _| Ok(()));

        let dispatcher = MailDispatcherImpl::new(Arc::new(config), Arc::new(connector), None);

        dispatcher
            .send(request(vec![RenderedTemplate::text("Hi")])?)
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_disabled_mail_is_a_no_op() -> TestResult {
        let config = provider(&[(keys::MAIL_METHOD, "disabled")]);

        let mut connector = MockChannelConnector::new();
        connector.expect_deliver().times(0);

        let dispatcher = MailDispatcherImpl::new(Arc::new(config), Arc::new(connector), None);

        dispatcher
            .send(request(vec![RenderedTemplate::text("Hi")])?)
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_delivery_failure_is_propagated() -> TestResult {
        let mut connector = MockChannelConnector::new();

        connector
            .expect_deliver()
            .times(1)
            .returning(|_, _| Err(DeliveryError::Transport(anyhow!("connection refused"))));

        let dispatcher =
            MailDispatcherImpl::new(Arc::new(provider(&[])), Arc::new(connector), None);

        let result = dispatcher
            .send(request(vec![RenderedTemplate::text("Hi")])?)
            .await;

        assert!(matches!(
            result,
            Err(MailError::Delivery(DeliveryError::Transport(_)))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_configuration_failure_skips_delivery() -> TestResult {
        let mut config = MockConfigProvider::new();

        config
            .expect_get()
            .returning(|_, _| Err(ConfigError::Unavailable(anyhow!("store offline"))));

        let mut connector = MockChannelConnector::new();
        connector.expect_deliver().times(0);

        let dispatcher = MailDispatcherImpl::new(Arc::new(config), Arc::new(connector), None);

        let result = dispatcher
            .send(request(vec![RenderedTemplate::text("Hi")])?)
            .await;

        assert!(matches!(result, Err(MailError::Configuration(_))));

        Ok(())
    }

    #[test]
    fn test_assemble_uses_html_with_text_alternative() -> TestResult {
        let dispatcher = MailDispatcherImpl::new(
            Arc::new(MockConfigProvider::new()),
            Arc::new(MockChannelConnector::new()),
            Some("shop.example".to_string()),
        );

        let message = dispatcher.assemble(request(vec![
            RenderedTemplate::html("<p>Hi</p>"),
            RenderedTemplate::text("Hi"),
        ])?);

        assert_eq!(message.body.primary(), "<p>Hi</p>");
        assert_eq!(message.body.alternative(), Some("Hi"));
        assert!(message.message_id.as_str().ends_with(".maildispatch@shop.example"));

        Ok(())
    }

    #[test]
    fn test_assemble_carries_recipients_and_parts() -> TestResult {
        let dispatcher = MailDispatcherImpl::new(
            Arc::new(MockConfigProvider::new()),
            Arc::new(MockChannelConnector::new()),
            None,
        );

        let mut request = request(vec![RenderedTemplate::text("Hi")])?;
        request.reply_to = Some(MailAddress::parse("support@x.com", None)?);
        request.bcc = vec![MailAddress::parse("audit@x.com", None)?];
        request.attachments = vec![Attachment::new("a.txt", b"a".to_vec(), None)];
        request.inline_images = vec![InlineImage {
            content_id: "logo".to_string(),
            path: PathBuf::from("logo.png"),
            content: vec![1],
        }];

        let message = dispatcher.assemble(request);

        assert!(!message.body.is_html());
        assert_eq!(message.reply_to.map(|r| r.email.to_string()), Some("support@x.com".to_string()));
        assert_eq!(message.bcc.len(), 1);
        assert_eq!(message.attachments.len(), 1);
        assert_eq!(message.inline_images[0].content_id, "logo");

        Ok(())
    }
}
