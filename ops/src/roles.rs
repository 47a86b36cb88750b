use crate::clients::IdentityClient;
use crate::error::{self, Result};
use crate::report::Reporter;
use clusterops_types::{Ensured, Removal, RoleConfig, RoleSummary};
use log::{debug, info};
use snafu::ResultExt;

/// Make sure the role described by `role` exists and has every one of its policies attached.
/// An existing role is reused as-is and no create call is made for it. Policies that are already
/// attached are left alone. If the role had to be created, its name is pushed onto `created`
/// before any policy is attached, so the caller knows about it even if attaching fails.
pub async fn ensure_role<C>(
    client: &C,
    role: &RoleConfig,
    created: &mut Vec<String>,
    reporter: &dyn Reporter,
) -> Result<Ensured<RoleSummary>>
where
    C: IdentityClient,
{
    let ensured = match client.role(&role.name).await? {
        Some(existing) => Ensured::Existing(existing),
        None => {
            reporter.start(&format!("Creating IAM role: {}", role.name));
            let trust_policy = role
                .trust_policy()
                .to_document()
                .context(error::TrustPolicySnafu {
                    role_name: &role.name,
                })?;
            debug!("Trust policy for '{}': {}", role.name, trust_policy);
            client.create_role(&role.name, &trust_policy).await?
        }
    };
    if ensured.was_created() {
        created.push(format!("IAM role {}", role.name));
    }

    let attached = client
        .attached_policies(&role.name)
        .await?
        .unwrap_or_default();
    for policy_arn in role
        .policy_arns
        .iter()
        .filter(|arn| !attached.contains(arn))
    {
        info!("Attaching policy '{}' to role '{}'", policy_arn, role.name);
        client.attach_policy(&role.name, policy_arn).await?;
    }

    match &ensured {
        Ensured::Created(summary) => reporter.done(&format!(
            "IAM role {} created with ARN: {}",
            role.name, summary.arn
        )),
        Ensured::Existing(summary) => reporter.skip(&format!(
            "IAM role {} already exists with ARN: {}",
            role.name, summary.arn
        )),
    }
    Ok(ensured)
}

/// Detach every policy from the role named `role_name`, then delete it. A role that does not
/// exist is reported and skipped.
pub async fn remove_role<C>(
    client: &C,
    role_name: &str,
    reporter: &dyn Reporter,
) -> Result<Removal>
where
    C: IdentityClient,
{
    reporter.start(&format!(
        "Detaching policies and deleting IAM role: {}",
        role_name
    ));
    let policies = match client.attached_policies(role_name).await? {
        Some(policies) => policies,
        None => {
            reporter.skip(&format!("IAM role {} does not exist. Skipping.", role_name));
            return Ok(Removal::NotFound);
        }
    };

    for policy_arn in &policies {
        reporter.item(&format!("Detaching policy: {}", policy_arn));
        client.detach_policy(role_name, policy_arn).await?;
    }

    let removal = client.delete_role(role_name).await?;
    match removal {
        Removal::Started => reporter.done(&format!("IAM role {} deleted.", role_name)),
        Removal::NotFound => {
            reporter.skip(&format!("IAM role {} does not exist. Skipping.", role_name))
        }
    }
    Ok(removal)
}
