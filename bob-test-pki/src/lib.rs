//! Throwaway PKI for the workspace tests.
//!
//! [`TestPki::generate`] mints a fresh CA and signs a server leaf plus client
//! leaves in every validity state the server has to tell apart. Nothing here is
//! meant for production use; failures panic.

use rcgen::{
    BasicConstraints, Certificate, CertificateParams, DnType, ExtendedKeyUsagePurpose, IsCa,
    Issuer, KeyPair, KeyUsagePurpose,
};
use rustls::pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer, ServerName};
use rustls::{ClientConfig, RootCertStore};
use std::io;
use std::path::Path;
use std::sync::Arc;

/// DNS name in the server certificate.
pub const SERVER_NAME: &str = "localhost";

/// Common name of the valid client leaf.
pub const CLIENT_COMMON_NAME: &str = "alice";

/// File names the server expects in its working directory.
pub const CA_FILE: &str = "ca.crt";
/// See [`CA_FILE`].
pub const SERVER_CERT_FILE: &str = "bob_server.crt";
/// See [`CA_FILE`].
pub const SERVER_KEY_FILE: &str = "bob_server.key";

/// A certificate with its PKCS#8 private key, in PEM and DER.
#[derive(Clone, Debug)]
pub struct Leaf {
    /// PEM certificate.
    pub cert_pem: String,
    /// PEM PKCS#8 private key.
    pub key_pem: String,
    /// DER certificate.
    pub cert_der: CertificateDer<'static>,
    key_pkcs8: Vec<u8>,
}

impl Leaf {
    fn new(cert: &Certificate, key: &KeyPair) -> Self {
        Self {
            cert_pem: cert.pem(),
            key_pem: key.serialize_pem(),
            cert_der: cert.der().clone(),
            key_pkcs8: key.serialize_der(),
        }
    }

    /// DER private key.
    pub fn private_key(&self) -> PrivateKeyDer<'static> {
        PrivatePkcs8KeyDer::from(self.key_pkcs8.clone()).into()
    }
}

#[derive(Clone, Copy)]
enum Validity {
    Current,
    Expired,
    NotYetValid,
}

/// A CA and the leaves it signed.
#[derive(Debug)]
pub struct TestPki {
    ca_pem: String,
    ca_der: CertificateDer<'static>,
    server: Leaf,
    client: Leaf,
    expired_client: Leaf,
    not_yet_valid_client: Leaf,
}

impl TestPki {
    /// Mints a new CA and signs all leaves with it.
    pub fn generate() -> Self {
        let ca_key = KeyPair::generate().expect("generate CA key");
        let mut ca_params = CertificateParams::new(Vec::<String>::new()).expect("CA params");
        ca_params
            .distinguished_name
            .push(DnType::CommonName, "Bob Test CA");
        ca_params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
        ca_params.key_usages = vec![
            KeyUsagePurpose::KeyCertSign,
            KeyUsagePurpose::DigitalSignature,
            KeyUsagePurpose::CrlSign,
        ];
        let ca_cert = ca_params.self_signed(&ca_key).expect("self-sign CA");
        let ca_pem = ca_cert.pem();
        let ca_der = ca_cert.der().clone();
        let issuer = Issuer::new(ca_params, ca_key);

        let sign = |common_name: &str, purpose, validity| {
            let key = KeyPair::generate().expect("generate leaf key");
            let params = leaf_params(common_name, purpose, validity);
            let cert = params.signed_by(&key, &issuer).expect("sign leaf");
            Leaf::new(&cert, &key)
        };

        let server = sign(
            "bob_server",
            ExtendedKeyUsagePurpose::ServerAuth,
            Validity::Current,
        );
        let client = sign(
            CLIENT_COMMON_NAME,
            ExtendedKeyUsagePurpose::ClientAuth,
            Validity::Current,
        );
        let expired_client = sign(
            "expired",
            ExtendedKeyUsagePurpose::ClientAuth,
            Validity::Expired,
        );
        let not_yet_valid_client = sign(
            "not-yet-valid",
            ExtendedKeyUsagePurpose::ClientAuth,
            Validity::NotYetValid,
        );

        Self {
            ca_pem,
            ca_der,
            server,
            client,
            expired_client,
            not_yet_valid_client,
        }
    }

    /// A self-signed client leaf unrelated to any [`TestPki`] CA.
    pub fn foreign_client() -> Leaf {
        let key = KeyPair::generate().expect("generate foreign key");
        let params = leaf_params(
            "mallory",
            ExtendedKeyUsagePurpose::ClientAuth,
            Validity::Current,
        );
        let cert = params.self_signed(&key).expect("self-sign foreign leaf");
        Leaf::new(&cert, &key)
    }

    /// PEM CA certificate.
    pub fn ca_pem(&self) -> &str {
        &self.ca_pem
    }

    /// DER CA certificate.
    pub fn ca_der(&self) -> &CertificateDer<'static> {
        &self.ca_der
    }

    /// Server leaf valid for [`SERVER_NAME`] and `127.0.0.1`.
    pub fn server(&self) -> &Leaf {
        &self.server
    }

    /// Client leaf signed by the CA and currently valid.
    pub fn client(&self) -> &Leaf {
        &self.client
    }

    /// Client leaf signed by the CA whose validity ended in 2001.
    pub fn expired_client(&self) -> &Leaf {
        &self.expired_client
    }

    /// Client leaf signed by the CA whose validity starts in 2090.
    pub fn not_yet_valid_client(&self) -> &Leaf {
        &self.not_yet_valid_client
    }

    /// Writes `ca.crt`, `bob_server.crt` and `bob_server.key` into `dir`.
    pub fn write_to(&self, dir: &Path) -> io::Result<()> {
        std::fs::write(dir.join(CA_FILE), &self.ca_pem)?;
        std::fs::write(dir.join(SERVER_CERT_FILE), &self.server.cert_pem)?;
        std::fs::write(dir.join(SERVER_KEY_FILE), &self.server.key_pem)?;
        Ok(())
    }

    /// A client config trusting this CA, presenting `client` when given.
    pub fn client_config(&self, client: Option<&Leaf>) -> ClientConfig {
        let mut roots = RootCertStore::empty();
        roots
            .add(self.ca_der.clone())
            .expect("CA usable as a root");

        let builder =
            ClientConfig::builder_with_provider(Arc::new(rustls::crypto::ring::default_provider()))
                .with_safe_default_protocol_versions()
                .expect("default protocol versions")
                .with_root_certificates(roots);

        match client {
            Some(leaf) => builder
                .with_client_auth_cert(vec![leaf.cert_der.clone()], leaf.private_key())
                .expect("client auth cert"),
            None => builder.with_no_client_auth(),
        }
    }
}

/// The name clients verify the server certificate against.
pub fn server_name() -> ServerName<'static> {
    ServerName::try_from(SERVER_NAME).expect("valid DNS name")
}

fn leaf_params(
    common_name: &str,
    purpose: ExtendedKeyUsagePurpose,
    validity: Validity,
) -> CertificateParams {
    let sans = match purpose {
        ExtendedKeyUsagePurpose::ServerAuth => vec![SERVER_NAME.to_owned(), "127.0.0.1".to_owned()],
        _ => Vec::new(),
    };

    let mut params = CertificateParams::new(sans).expect("leaf params");
    params
        .distinguished_name
        .push(DnType::CommonName, common_name);
    params.is_ca = IsCa::NoCa;
    params.key_usages = vec![KeyUsagePurpose::DigitalSignature];
    params.extended_key_usages = vec![purpose];

    match validity {
        Validity::Current => {}
        Validity::Expired => {
            params.not_before = rcgen::date_time_ymd(2000, 1, 1);
            params.not_after = rcgen::date_time_ymd(2001, 1, 1);
        }
        Validity::NotYetValid => {
            params.not_before = rcgen::date_time_ymd(2090, 1, 1);
            params.not_after = rcgen::date_time_ymd(2091, 1, 1);
        }
    }

    params
}
