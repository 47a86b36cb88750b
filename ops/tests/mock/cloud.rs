use super::role_arn;
use clusterops::clients::{
    ClientError, ClientResult, ClusterClient, ComputeClient, DatabaseClient, IdentityClient,
};
use clusterops_types::{
    ClusterRequest, ClusterState, DatabaseSummary, Ensured, InstanceSummary, NodegroupState,
    Removal, RoleSummary, SubnetSummary,
};
use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

/// One call made against the [`MockCloud`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Call {
    RunningInstances,
    DefaultVpc,
    Subnets(String),
    ClusterNames,
    ClusterState(String),
    CreateCluster(ClusterRequest),
    DeleteCluster(String),
    NodegroupNames(String),
    NodegroupState(String),
    DeleteNodegroup(String),
    DbInstances,
    Role(String),
    CreateRole(String),
    AttachedPolicies(String),
    AttachPolicy(String, String),
    DetachPolicy(String, String),
    DeleteRole(String),
}

impl Call {
    /// The name of the provider operation this call stands for.
    pub(crate) fn operation(&self) -> &'static str {
        match self {
            Call::RunningInstances => "DescribeInstances",
            Call::DefaultVpc => "DescribeVpcs",
            Call::Subnets(_) => "DescribeSubnets",
            Call::ClusterNames => "ListClusters",
            Call::ClusterState(_) => "DescribeCluster",
            Call::CreateCluster(_) => "CreateCluster",
            Call::DeleteCluster(_) => "DeleteCluster",
            Call::NodegroupNames(_) => "ListNodegroups",
            Call::NodegroupState(_) => "DescribeNodegroup",
            Call::DeleteNodegroup(_) => "DeleteNodegroup",
            Call::DbInstances => "DescribeDBInstances",
            Call::Role(_) => "GetRole",
            Call::CreateRole(_) => "CreateRole",
            Call::AttachedPolicies(_) => "ListAttachedRolePolicies",
            Call::AttachPolicy(..) => "AttachRolePolicy",
            Call::DetachPolicy(..) => "DetachRolePolicy",
            Call::DeleteRole(_) => "DeleteRole",
        }
    }

    pub(crate) fn is_iam(&self) -> bool {
        matches!(
            self,
            Call::Role(_)
                | Call::CreateRole(_)
                | Call::AttachedPolicies(_)
                | Call::AttachPolicy(..)
                | Call::DetachPolicy(..)
                | Call::DeleteRole(_)
        )
    }

    pub(crate) fn is_eks(&self) -> bool {
        matches!(
            self,
            Call::ClusterNames
                | Call::ClusterState(_)
                | Call::CreateCluster(_)
                | Call::DeleteCluster(_)
                | Call::NodegroupNames(_)
                | Call::NodegroupState(_)
                | Call::DeleteNodegroup(_)
        )
    }

    /// Whether the call creates, changes or deletes something.
    pub(crate) fn is_mutation(&self) -> bool {
        matches!(
            self,
            Call::CreateCluster(_)
                | Call::DeleteCluster(_)
                | Call::DeleteNodegroup(_)
                | Call::CreateRole(_)
                | Call::AttachPolicy(..)
                | Call::DetachPolicy(..)
                | Call::DeleteRole(_)
        )
    }
}

#[derive(Debug, Default)]
struct State {
    instances: Vec<InstanceSummary>,
    default_vpc: Option<String>,
    subnets: Vec<SubnetSummary>,
    clusters: BTreeMap<String, ClusterState>,
    /// Keyed by (cluster, node group).
    nodegroups: BTreeMap<(String, String), NodegroupState>,
    databases: Vec<DatabaseSummary>,
    /// Role name to attached policy ARNs.
    roles: BTreeMap<String, Vec<String>>,
    /// Operations that fail every time they are called.
    failing: HashSet<&'static str>,
    /// The state a `CREATING` cluster settles into. `ACTIVE` unless set.
    creation_outcome: Option<ClusterState>,
    /// Roles that `GetRole` does not see yet, as if another caller created them in between.
    unseen_roles: HashSet<String>,
    /// Clusters that `ListClusters` returns but that are gone by the time they are described.
    vanished_clusters: Vec<String>,
}

/// An in-memory region. Build one with the `with_*` methods, run an operation against it, then
/// inspect [`MockCloud::calls`] and the remaining resources.
#[derive(Debug, Default)]
pub(crate) struct MockCloud {
    state: Mutex<State>,
    calls: Mutex<Vec<Call>>,
}

impl MockCloud {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_default_vpc(self, vpc_id: &str, subnets: Vec<SubnetSummary>) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.default_vpc = Some(vpc_id.to_string());
            state.subnets = subnets;
        }
        self
    }

    pub(crate) fn with_role(self, name: &str, policies: &[&str]) -> Self {
        self.state.lock().unwrap().roles.insert(
            name.to_string(),
            policies.iter().map(|arn| arn.to_string()).collect(),
        );
        self
    }

    pub(crate) fn with_cluster(self, name: &str, status: ClusterState) -> Self {
        self.state
            .lock()
            .unwrap()
            .clusters
            .insert(name.to_string(), status);
        self
    }

    pub(crate) fn with_nodegroup(self, cluster: &str, nodegroup: &str) -> Self {
        self.state.lock().unwrap().nodegroups.insert(
            (cluster.to_string(), nodegroup.to_string()),
            NodegroupState::Active,
        );
        self
    }

    pub(crate) fn with_instances(self, instances: Vec<InstanceSummary>) -> Self {
        self.state.lock().unwrap().instances = instances;
        self
    }

    pub(crate) fn with_databases(self, databases: Vec<DatabaseSummary>) -> Self {
        self.state.lock().unwrap().databases = databases;
        self
    }

    /// Make every call to `operation` fail.
    pub(crate) fn failing(self, operation: &'static str) -> Self {
        self.state.lock().unwrap().failing.insert(operation);
        self
    }

    /// Make newly created clusters end up in `status` instead of `ACTIVE`.
    pub(crate) fn creation_ends_in(self, status: ClusterState) -> Self {
        self.state.lock().unwrap().creation_outcome = Some(status);
        self
    }

    /// `GetRole` reports `name` as missing, but it exists by the time `CreateRole` is called.
    pub(crate) fn created_concurrently(self, name: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .unseen_roles
            .insert(name.to_string());
        self
    }

    /// `ListClusters` includes `name` but `DescribeCluster` no longer finds it.
    pub(crate) fn with_vanished_cluster(self, name: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .vanished_clusters
            .push(name.to_string());
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// The position of the first call matching `predicate`.
    pub(crate) fn first(&self, predicate: impl Fn(&Call) -> bool) -> Option<usize> {
        self.calls().iter().position(predicate)
    }

    /// The position of the last call matching `predicate`.
    pub(crate) fn last(&self, predicate: impl Fn(&Call) -> bool) -> Option<usize> {
        self.calls().iter().rposition(predicate)
    }

    pub(crate) fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|&call| predicate(call)).count()
    }

    pub(crate) fn cluster(&self, name: &str) -> Option<ClusterState> {
        self.state.lock().unwrap().clusters.get(name).copied()
    }

    pub(crate) fn nodegroup_count(&self) -> usize {
        self.state.lock().unwrap().nodegroups.len()
    }

    /// The policies attached to `name`, or `None` if the role does not exist.
    pub(crate) fn role_policies(&self, name: &str) -> Option<Vec<String>> {
        self.state.lock().unwrap().roles.get(name).cloned()
    }

    /// Log the call, then fail it if its operation was set to fail.
    fn record(&self, call: Call) -> ClientResult<()> {
        let operation = call.operation();
        self.calls.lock().unwrap().push(call);
        if self.state.lock().unwrap().failing.contains(operation) {
            return Err(rejected(operation, "injected failure"));
        }
        Ok(())
    }
}

fn rejected(operation: &'static str, message: &str) -> ClientError {
    ClientError::request(
        operation,
        std::io::Error::new(std::io::ErrorKind::Other, message.to_string()),
    )
}

#[async_trait::async_trait]
impl ComputeClient for MockCloud {
    async fn running_instances(&self) -> ClientResult<Vec<InstanceSummary>> {
        self.record(Call::RunningInstances)?;
        Ok(self.state.lock().unwrap().instances.clone())
    }

    async fn default_vpc_id(&self) -> ClientResult<Option<String>> {
        self.record(Call::DefaultVpc)?;
        Ok(self.state.lock().unwrap().default_vpc.clone())
    }

    async fn subnets(&self, vpc_id: &str) -> ClientResult<Vec<SubnetSummary>> {
        self.record(Call::Subnets(vpc_id.to_string()))?;
        let state = self.state.lock().unwrap();
        if state.default_vpc.as_deref() == Some(vpc_id) {
            Ok(state.subnets.clone())
        } else {
            Ok(Vec::new())
        }
    }
}

#[async_trait::async_trait]
impl ClusterClient for MockCloud {
    async fn cluster_names(&self) -> ClientResult<Vec<String>> {
        self.record(Call::ClusterNames)?;
        let state = self.state.lock().unwrap();
        let mut names: Vec<String> = state.clusters.keys().cloned().collect();
        names.extend(state.vanished_clusters.iter().cloned());
        names.sort();
        Ok(names)
    }

    /// Each observation of a transitional state moves the cluster one step along.
    async fn cluster_state(&self, name: &str) -> ClientResult<Option<ClusterState>> {
        self.record(Call::ClusterState(name.to_string()))?;
        let mut state = self.state.lock().unwrap();
        let outcome = state.creation_outcome.unwrap_or(ClusterState::Active);
        let observed = state.clusters.get(name).copied();
        match observed {
            Some(ClusterState::Creating) => {
                state.clusters.insert(name.to_string(), outcome);
            }
            Some(ClusterState::Deleting) => {
                state.clusters.remove(name);
            }
            _ => {}
        }
        Ok(observed)
    }

    async fn create_cluster(&self, request: &ClusterRequest) -> ClientResult<()> {
        self.record(Call::CreateCluster(request.clone()))?;
        let mut state = self.state.lock().unwrap();
        if state.clusters.contains_key(&request.name) {
            return Err(rejected("CreateCluster", "ResourceInUseException"));
        }
        state
            .clusters
            .insert(request.name.clone(), ClusterState::Creating);
        Ok(())
    }

    async fn delete_cluster(&self, name: &str) -> ClientResult<Removal> {
        self.record(Call::DeleteCluster(name.to_string()))?;
        let mut state = self.state.lock().unwrap();
        if !state.clusters.contains_key(name) {
            return Ok(Removal::NotFound);
        }
        if state.nodegroups.keys().any(|(cluster, _)| cluster == name) {
            return Err(rejected(
                "DeleteCluster",
                "ResourceInUseException: cluster has node groups attached",
            ));
        }
        state
            .clusters
            .insert(name.to_string(), ClusterState::Deleting);
        Ok(Removal::Started)
    }

    async fn nodegroup_names(&self, cluster: &str) -> ClientResult<Vec<String>> {
        self.record(Call::NodegroupNames(cluster.to_string()))?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .nodegroups
            .keys()
            .filter(|(owner, _)| owner == cluster)
            .map(|(_, nodegroup)| nodegroup.clone())
            .collect())
    }

    async fn nodegroup_state(
        &self,
        cluster: &str,
        nodegroup: &str,
    ) -> ClientResult<Option<NodegroupState>> {
        self.record(Call::NodegroupState(nodegroup.to_string()))?;
        let mut state = self.state.lock().unwrap();
        let key = (cluster.to_string(), nodegroup.to_string());
        let observed = state.nodegroups.get(&key).copied();
        if observed == Some(NodegroupState::Deleting) {
            state.nodegroups.remove(&key);
        }
        Ok(observed)
    }

    async fn delete_nodegroup(&self, cluster: &str, nodegroup: &str) -> ClientResult<Removal> {
        self.record(Call::DeleteNodegroup(nodegroup.to_string()))?;
        let mut state = self.state.lock().unwrap();
        match state
            .nodegroups
            .get_mut(&(cluster.to_string(), nodegroup.to_string()))
        {
            Some(status) => {
                *status = NodegroupState::Deleting;
                Ok(Removal::Started)
            }
            None => Ok(Removal::NotFound),
        }
    }
}

#[async_trait::async_trait]
impl DatabaseClient for MockCloud {
    async fn db_instances(&self) -> ClientResult<Vec<DatabaseSummary>> {
        self.record(Call::DbInstances)?;
        Ok(self.state.lock().unwrap().databases.clone())
    }
}

#[async_trait::async_trait]
impl IdentityClient for MockCloud {
    async fn role(&self, name: &str) -> ClientResult<Option<RoleSummary>> {
        self.record(Call::Role(name.to_string()))?;
        let mut state = self.state.lock().unwrap();
        if state.unseen_roles.remove(name) {
            return Ok(None);
        }
        Ok(state.roles.contains_key(name).then(|| RoleSummary {
            name: name.to_string(),
            arn: role_arn(name),
        }))
    }

    async fn create_role(
        &self,
        name: &str,
        _trust_policy: &str,
    ) -> ClientResult<Ensured<RoleSummary>> {
        self.record(Call::CreateRole(name.to_string()))?;
        let summary = RoleSummary {
            name: name.to_string(),
            arn: role_arn(name),
        };
        let mut state = self.state.lock().unwrap();
        if state.roles.contains_key(name) {
            return Ok(Ensured::Existing(summary));
        }
        state.roles.insert(name.to_string(), Vec::new());
        Ok(Ensured::Created(summary))
    }

    async fn attached_policies(&self, role: &str) -> ClientResult<Option<Vec<String>>> {
        self.record(Call::AttachedPolicies(role.to_string()))?;
        Ok(self.state.lock().unwrap().roles.get(role).cloned())
    }

    async fn attach_policy(&self, role: &str, policy_arn: &str) -> ClientResult<()> {
        self.record(Call::AttachPolicy(role.to_string(), policy_arn.to_string()))?;
        let mut state = self.state.lock().unwrap();
        let policies = state
            .roles
            .get_mut(role)
            .ok_or_else(|| rejected("AttachRolePolicy", "NoSuchEntityException"))?;
        if !policies.iter().any(|attached| attached == policy_arn) {
            policies.push(policy_arn.to_string());
        }
        Ok(())
    }

    async fn detach_policy(&self, role: &str, policy_arn: &str) -> ClientResult<()> {
        self.record(Call::DetachPolicy(role.to_string(), policy_arn.to_string()))?;
        let mut state = self.state.lock().unwrap();
        let policies = state
            .roles
            .get_mut(role)
            .ok_or_else(|| rejected("DetachRolePolicy", "NoSuchEntityException"))?;
        policies.retain(|attached| attached != policy_arn);
        Ok(())
    }

    /// Like IAM, refuses to delete a role that still has policies attached.
    async fn delete_role(&self, name: &str) -> ClientResult<Removal> {
        self.record(Call::DeleteRole(name.to_string()))?;
        let mut state = self.state.lock().unwrap();
        match state.roles.get(name) {
            None => Ok(Removal::NotFound),
            Some(policies) if !policies.is_empty() => Err(rejected(
                "DeleteRole",
                "DeleteConflictException: policies are still attached",
            )),
            Some(_) => {
                state.roles.remove(name);
                Ok(Removal::Started)
            }
        }
    }
}
