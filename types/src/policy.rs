use crate::constants::POLICY_DOCUMENT_VERSION;
use serde::{Deserialize, Serialize};

/// An IAM trust (assume-role) policy document.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrustPolicy {
    pub version: String,
    pub statement: Vec<TrustStatement>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrustStatement {
    pub effect: String,
    pub principal: Principal,
    pub action: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Principal {
    pub service: String,
}

impl TrustPolicy {
    /// A policy that lets `service` (e.g. `eks.amazonaws.com`) assume the role.
    pub fn for_service<S: Into<String>>(service: S) -> Self {
        Self {
            version: POLICY_DOCUMENT_VERSION.to_string(),
            statement: vec![TrustStatement {
                effect: "Allow".to_string(),
                principal: Principal {
                    service: service.into(),
                },
                action: "sts:AssumeRole".to_string(),
            }],
        }
    }

    /// The compact JSON form expected by `CreateRole`.
    pub fn to_document(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[test]
fn eks_trust_policy_document() {
    let document = TrustPolicy::for_service("eks.amazonaws.com")
        .to_document()
        .unwrap();
    assert_eq!(
        document,
        r#"{"Version":"2012-10-17","Statement":[{"Effect":"Allow","Principal":{"Service":"eks.amazonaws.com"},"Action":"sts:AssumeRole"}]}"#
    );
}
