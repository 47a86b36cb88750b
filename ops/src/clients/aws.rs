use super::error::MissingFieldSnafu;
use super::{
    ClientError, ClientResult, ClusterClient, ComputeClient, DatabaseClient, IdentityClient,
};
use aws_sdk_ec2::model::Filter;
use aws_sdk_eks::error::{
    DeleteClusterErrorKind, DeleteNodegroupErrorKind, DescribeClusterErrorKind,
    DescribeNodegroupErrorKind, ListNodegroupsErrorKind,
};
use aws_sdk_eks::model::VpcConfigRequest;
use aws_sdk_eks::types::SdkError;
use aws_sdk_iam::error::{
    CreateRoleErrorKind, DeleteRoleErrorKind, GetRoleErrorKind, ListAttachedRolePoliciesErrorKind,
};
use aws_types::SdkConfig;
use clusterops_types::{
    ClusterRequest, ClusterState, DatabaseSummary, Ensured, InstanceSummary, NodegroupState,
    Removal, RoleSummary, SubnetSummary,
};
use log::{debug, trace};
use snafu::OptionExt;

/// The AWS SDK clients for every service the tools talk to, all built from one region-scoped
/// `SdkConfig`.
#[derive(Debug, Clone)]
pub struct AwsClients {
    ec2_client: aws_sdk_ec2::Client,
    eks_client: aws_sdk_eks::Client,
    iam_client: aws_sdk_iam::Client,
    rds_client: aws_sdk_rds::Client,
}

impl AwsClients {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            ec2_client: aws_sdk_ec2::Client::new(config),
            eks_client: aws_sdk_eks::Client::new(config),
            iam_client: aws_sdk_iam::Client::new(config),
            rds_client: aws_sdk_rds::Client::new(config),
        }
    }
}

/// The modeled error of a service response, if the provider answered with one.
fn service_error<E, R>(error: &SdkError<E, R>) -> Option<&E> {
    match error {
        SdkError::ServiceError(context) => Some(context.err()),
        _ => None,
    }
}

fn filter(name: &str, value: &str) -> Filter {
    Filter::builder().name(name).values(value).build()
}

#[async_trait::async_trait]
impl ComputeClient for AwsClients {
    async fn running_instances(&self) -> ClientResult<Vec<InstanceSummary>> {
        let mut instances = Vec::new();
        let mut next_token: Option<String> = None;
        loop {
            let output = self
                .ec2_client
                .describe_instances()
                .filters(filter("instance-state-name", "running"))
                .set_next_token(next_token)
                .send()
                .await
                .map_err(|e| ClientError::request("DescribeInstances", e))?;
            for reservation in output.reservations().unwrap_or_default() {
                for instance in reservation.instances().unwrap_or_default() {
                    instances.push(InstanceSummary {
                        instance_id: instance
                            .instance_id()
                            .context(MissingFieldSnafu {
                                operation: "DescribeInstances",
                                what: "InstanceId",
                            })?
                            .to_string(),
                        instance_type: instance
                            .instance_type()
                            .map(|instance_type| instance_type.as_str())
                            .unwrap_or("unknown")
                            .to_string(),
                    });
                }
            }
            next_token = output.next_token().map(ToString::to_string);
            if next_token.is_none() {
                return Ok(instances);
            }
            trace!("Fetching the next page of instances");
        }
    }

    async fn default_vpc_id(&self) -> ClientResult<Option<String>> {
        let output = self
            .ec2_client
            .describe_vpcs()
            .filters(filter("isDefault", "true"))
            .send()
            .await
            .map_err(|e| ClientError::request("DescribeVpcs", e))?;
        Ok(output
            .vpcs()
            .unwrap_or_default()
            .iter()
            .find_map(|vpc| vpc.vpc_id())
            .map(ToString::to_string))
    }

    async fn subnets(&self, vpc_id: &str) -> ClientResult<Vec<SubnetSummary>> {
        let mut subnets = Vec::new();
        let mut next_token: Option<String> = None;
        loop {
            let output = self
                .ec2_client
                .describe_subnets()
                .filters(filter("vpc-id", vpc_id))
                .set_next_token(next_token)
                .send()
                .await
                .map_err(|e| ClientError::request("DescribeSubnets", e))?;
            for subnet in output.subnets().unwrap_or_default() {
                subnets.push(SubnetSummary {
                    subnet_id: subnet
                        .subnet_id()
                        .context(MissingFieldSnafu {
                            operation: "DescribeSubnets",
                            what: "SubnetId",
                        })?
                        .to_string(),
                    availability_zone: subnet.availability_zone().map(ToString::to_string),
                });
            }
            next_token = output.next_token().map(ToString::to_string);
            if next_token.is_none() {
                return Ok(subnets);
            }
        }
    }
}

#[async_trait::async_trait]
impl ClusterClient for AwsClients {
    async fn cluster_names(&self) -> ClientResult<Vec<String>> {
        let mut names = Vec::new();
        let mut next_token: Option<String> = None;
        loop {
            let output = self
                .eks_client
                .list_clusters()
                .set_next_token(next_token)
                .send()
                .await
                .map_err(|e| ClientError::request("ListClusters", e))?;
            names.extend(output.clusters().unwrap_or_default().iter().cloned());
            next_token = output.next_token().map(ToString::to_string);
            if next_token.is_none() {
                return Ok(names);
            }
        }
    }

    async fn cluster_state(&self, name: &str) -> ClientResult<Option<ClusterState>> {
        let result = self.eks_client.describe_cluster().name(name).send().await;
        let output = match result {
            Ok(output) => output,
            Err(e) => {
                return if matches!(
                    service_error(&e).map(|e| &e.kind),
                    Some(DescribeClusterErrorKind::ResourceNotFoundException(_))
                ) {
                    debug!("Cluster '{}' was not found", name);
                    Ok(None)
                } else {
                    Err(ClientError::request("DescribeCluster", e))
                };
            }
        };
        let status = output
            .cluster()
            .and_then(|cluster| cluster.status())
            .context(MissingFieldSnafu {
                operation: "DescribeCluster",
                what: "Cluster.Status",
            })?;
        Ok(Some(ClusterState::from_provider(status.as_str())))
    }

    async fn create_cluster(&self, request: &ClusterRequest) -> ClientResult<()> {
        self.eks_client
            .create_cluster()
            .name(&request.name)
            .version(&request.version)
            .role_arn(&request.role_arn)
            .resources_vpc_config(
                VpcConfigRequest::builder()
                    .set_subnet_ids(Some(request.subnet_ids.clone()))
                    .endpoint_public_access(request.endpoint_public_access)
                    .endpoint_private_access(request.endpoint_private_access)
                    .build(),
            )
            .send()
            .await
            .map_err(|e| ClientError::request("CreateCluster", e))?;
        Ok(())
    }

    async fn delete_cluster(&self, name: &str) -> ClientResult<Removal> {
        match self.eks_client.delete_cluster().name(name).send().await {
            Ok(_) => Ok(Removal::Started),
            Err(e)
                if matches!(
                    service_error(&e).map(|e| &e.kind),
                    Some(DeleteClusterErrorKind::ResourceNotFoundException(_))
                ) =>
            {
                Ok(Removal::NotFound)
            }
            Err(e) => Err(ClientError::request("DeleteCluster", e)),
        }
    }

    async fn nodegroup_names(&self, cluster: &str) -> ClientResult<Vec<String>> {
        let mut names = Vec::new();
        let mut next_token: Option<String> = None;
        loop {
            let result = self
                .eks_client
                .list_nodegroups()
                .cluster_name(cluster)
                .set_next_token(next_token)
                .send()
                .await;
            let output = match result {
                Ok(output) => output,
                Err(e)
                    if matches!(
                        service_error(&e).map(|e| &e.kind),
                        Some(ListNodegroupsErrorKind::ResourceNotFoundException(_))
                    ) =>
                {
                    debug!("Cluster '{}' was not found, it has no node groups", cluster);
                    return Ok(names);
                }
                Err(e) => return Err(ClientError::request("ListNodegroups", e)),
            };
            names.extend(output.nodegroups().unwrap_or_default().iter().cloned());
            next_token = output.next_token().map(ToString::to_string);
            if next_token.is_none() {
                return Ok(names);
            }
        }
    }

    async fn nodegroup_state(
        &self,
        cluster: &str,
        nodegroup: &str,
    ) -> ClientResult<Option<NodegroupState>> {
        let result = self
            .eks_client
            .describe_nodegroup()
            .cluster_name(cluster)
            .nodegroup_name(nodegroup)
            .send()
            .await;
        let output = match result {
            Ok(output) => output,
            Err(e)
                if matches!(
                    service_error(&e).map(|e| &e.kind),
                    Some(DescribeNodegroupErrorKind::ResourceNotFoundException(_))
                ) =>
            {
                return Ok(None)
            }
            Err(e) => return Err(ClientError::request("DescribeNodegroup", e)),
        };
        let status = output
            .nodegroup()
            .and_then(|nodegroup| nodegroup.status())
            .context(MissingFieldSnafu {
                operation: "DescribeNodegroup",
                what: "Nodegroup.Status",
            })?;
        Ok(Some(NodegroupState::from_provider(status.as_str())))
    }

    async fn delete_nodegroup(&self, cluster: &str, nodegroup: &str) -> ClientResult<Removal> {
        let result = self
            .eks_client
            .delete_nodegroup()
            .cluster_name(cluster)
            .nodegroup_name(nodegroup)
            .send()
            .await;
        match result {
            Ok(_) => Ok(Removal::Started),
            Err(e)
                if matches!(
                    service_error(&e).map(|e| &e.kind),
                    Some(DeleteNodegroupErrorKind::ResourceNotFoundException(_))
                ) =>
            {
                Ok(Removal::NotFound)
            }
            Err(e) => Err(ClientError::request("DeleteNodegroup", e)),
        }
    }
}

#[async_trait::async_trait]
impl DatabaseClient for AwsClients {
    async fn db_instances(&self) -> ClientResult<Vec<DatabaseSummary>> {
        let mut databases = Vec::new();
        let mut marker: Option<String> = None;
        loop {
            let output = self
                .rds_client
                .describe_db_instances()
                .set_marker(marker)
                .send()
                .await
                .map_err(|e| ClientError::request("DescribeDBInstances", e))?;
            for db in output.db_instances().unwrap_or_default() {
                databases.push(DatabaseSummary {
                    identifier: db
                        .db_instance_identifier()
                        .context(MissingFieldSnafu {
                            operation: "DescribeDBInstances",
                            what: "DBInstanceIdentifier",
                        })?
                        .to_string(),
                    engine: db.engine().unwrap_or_default().to_string(),
                    status: db.db_instance_status().unwrap_or_default().to_string(),
                });
            }
            marker = output.marker().map(ToString::to_string);
            if marker.is_none() {
                return Ok(databases);
            }
        }
    }
}

#[async_trait::async_trait]
impl IdentityClient for AwsClients {
    async fn role(&self, name: &str) -> ClientResult<Option<RoleSummary>> {
        let output = match self.iam_client.get_role().role_name(name).send().await {
            Ok(output) => output,
            Err(e)
                if matches!(
                    service_error(&e).map(|e| &e.kind),
                    Some(GetRoleErrorKind::NoSuchEntityException(_))
                ) =>
            {
                return Ok(None)
            }
            Err(e) => return Err(ClientError::request("GetRole", e)),
        };
        let arn = output
            .role()
            .and_then(|role| role.arn())
            .context(MissingFieldSnafu {
                operation: "GetRole",
                what: "Role.Arn",
            })?;
        Ok(Some(RoleSummary {
            name: name.to_string(),
            arn: arn.to_string(),
        }))
    }

    async fn create_role(
        &self,
        name: &str,
        trust_policy: &str,
    ) -> ClientResult<Ensured<RoleSummary>> {
        let result = self
            .iam_client
            .create_role()
            .role_name(name)
            .assume_role_policy_document(trust_policy)
            .send()
            .await;
        let output = match result {
            Ok(output) => output,
            Err(e)
                if matches!(
                    service_error(&e).map(|e| &e.kind),
                    Some(CreateRoleErrorKind::EntityAlreadyExistsException(_))
                ) =>
            {
                debug!("Role '{}' was created by someone else first", name);
                return self
                    .role(name)
                    .await?
                    .map(Ensured::Existing)
                    .context(MissingFieldSnafu {
                        operation: "GetRole",
                        what: "Role",
                    });
            }
            Err(e) => return Err(ClientError::request("CreateRole", e)),
        };
        let arn = output
            .role()
            .and_then(|role| role.arn())
            .context(MissingFieldSnafu {
                operation: "CreateRole",
                what: "Role.Arn",
            })?;
        Ok(Ensured::Created(RoleSummary {
            name: name.to_string(),
            arn: arn.to_string(),
        }))
    }

    async fn attached_policies(&self, role: &str) -> ClientResult<Option<Vec<String>>> {
        let mut arns = Vec::new();
        let mut marker: Option<String> = None;
        loop {
            let result = self
                .iam_client
                .list_attached_role_policies()
                .role_name(role)
                .set_marker(marker)
                .send()
                .await;
            let output = match result {
                Ok(output) => output,
                Err(e)
                    if matches!(
                        service_error(&e).map(|e| &e.kind),
                        Some(ListAttachedRolePoliciesErrorKind::NoSuchEntityException(_))
                    ) =>
                {
                    return Ok(None)
                }
                Err(e) => return Err(ClientError::request("ListAttachedRolePolicies", e)),
            };
            arns.extend(
                output
                    .attached_policies()
                    .unwrap_or_default()
                    .iter()
                    .filter_map(|policy| policy.policy_arn())
                    .map(ToString::to_string),
            );
            // IAM only returns a marker when the listing is truncated.
            marker = output.marker().map(ToString::to_string);
            if marker.is_none() {
                return Ok(Some(arns));
            }
        }
    }

    async fn attach_policy(&self, role: &str, policy_arn: &str) -> ClientResult<()> {
        self.iam_client
            .attach_role_policy()
            .role_name(role)
            .policy_arn(policy_arn)
            .send()
            .await
            .map_err(|e| ClientError::request("AttachRolePolicy", e))?;
        Ok(())
    }

    async fn detach_policy(&self, role: &str, policy_arn: &str) -> ClientResult<()> {
        self.iam_client
            .detach_role_policy()
            .role_name(role)
            .policy_arn(policy_arn)
            .send()
            .await
            .map_err(|e| ClientError::request("DetachRolePolicy", e))?;
        Ok(())
    }

    async fn delete_role(&self, name: &str) -> ClientResult<Removal> {
        match self.iam_client.delete_role().role_name(name).send().await {
            Ok(_) => Ok(Removal::Started),
            Err(e)
                if matches!(
                    service_error(&e).map(|e| &e.kind),
                    Some(DeleteRoleErrorKind::NoSuchEntityException(_))
                ) =>
            {
                Ok(Removal::NotFound)
            }
            Err(e) => Err(ClientError::request("DeleteRole", e)),
        }
    }
}
