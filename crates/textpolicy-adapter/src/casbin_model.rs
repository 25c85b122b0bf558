//! Embedded RBAC model used when no model conf is supplied.
//!
//! Requests, policies and role links are all `sub, obj, act` triples with a
//! single `g = _, _` role hierarchy, matching the policy text the adapter
//! reads and writes.
use casbin::DefaultModel;

const RBAC_MODEL_CONF: &str = "\
[request_definition]
r = sub, obj, act

[policy_definition]
p = sub, obj, act

[role_definition]
g = _, _

[policy_effect]
e = some(where (p.eft == allow))

[matchers]
m = g(r.sub, p.sub) && r.obj == p.obj && r.act == p.act
";

/// Conf text of the embedded RBAC model.
pub fn rbac_model_string() -> &'static str {
    RBAC_MODEL_CONF
}

/// Parse the embedded RBAC model into a fresh casbin model.
pub async fn rbac_model() -> casbin::Result<DefaultModel> {
    DefaultModel::from_str(rbac_model_string()).await
}
