/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::sync::Arc;

use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::CryptoProvider;
use rustls::{ClientConfig, DigitallySignedStruct, RootCertStore, SignatureScheme};
use rustls_pki_types::{CertificateDer, ServerName, UnixTime};
use tokio_rustls::TlsConnector;

/// TLS settings used by the `AUTH TLS` upgrade.
///
/// The certificate verification policy is chosen by the caller.
#[derive(Clone)]
pub struct FtpTlsConfig {
    client_config: Arc<ClientConfig>,
    server_name: Option<String>,
}

impl FtpTlsConfig {
    pub fn new(client_config: Arc<ClientConfig>) -> Self {
        FtpTlsConfig {
            client_config,
            server_name: None,
        }
    }

    /// Verify the server certificate against `roots`.
    pub fn strict(roots: RootCertStore) -> Result<Self, rustls::Error> {
        let config = ClientConfig::builder_with_provider(Arc::new(default_provider()))
            .with_safe_default_protocol_versions()?
            .with_root_certificates(roots)
            .with_no_client_auth();
        Ok(FtpTlsConfig::new(Arc::new(config)))
    }

    /// Verify the server certificate against the Mozilla root store.
    pub fn with_webpki_roots() -> Result<Self, rustls::Error> {
        let roots = RootCertStore {
            roots: webpki_roots::TLS_SERVER_ROOTS.to_vec(),
        };
        FtpTlsConfig::strict(roots)
    }

    /// Accept any server certificate. Handshake signatures are still checked.
    pub fn permissive() -> Result<Self, rustls::Error> {
        let provider = Arc::new(default_provider());
        let config = ClientConfig::builder_with_provider(provider.clone())
            .with_safe_default_protocol_versions()?
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(NoCertVerification(provider)))
            .with_no_client_auth();
        Ok(FtpTlsConfig::new(Arc::new(config)))
    }

    /// Use this name for SNI and verification instead of the server host.
    pub fn set_server_name(&mut self, name: String) {
        self.server_name = Some(name);
    }

    pub(crate) fn connector(&self) -> TlsConnector {
        TlsConnector::from(self.client_config.clone())
    }

    pub(crate) fn server_name(&self, host: &str) -> Option<ServerName<'static>> {
        let name = self.server_name.as_deref().unwrap_or(host);
        ServerName::try_from(name.to_string()).ok()
    }
}

fn default_provider() -> CryptoProvider {
    rustls::crypto::ring::default_provider()
}

#[derive(Debug)]
struct NoCertVerification(Arc<CryptoProvider>);

impl ServerCertVerifier for NoCertVerification {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        rustls::crypto::verify_tls12_signature(
            message,
            cert,
            dss,
            &self.0.signature_verification_algorithms,
        )
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        rustls::crypto::verify_tls13_signature(
            message,
            cert,
            dss,
            &self.0.signature_verification_algorithms,
        )
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.0.signature_verification_algorithms.supported_schemes()
    }
}
