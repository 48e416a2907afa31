use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignEnrollment {
    pub contact_id: String,
    pub campaign_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowEnrollment {
    pub contact_id: String,
    pub workflow_id: String,
}
