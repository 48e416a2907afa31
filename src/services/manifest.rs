use axum::{
    http::{header, HeaderMap},
    Json,
};
use serde_json::{json, Value};

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn base_url(headers: &HeaderMap) -> String {
    let scheme = header_value(headers, "x-forwarded-proto").unwrap_or("http");
    let host = header_value(headers, header::HOST.as_str()).unwrap_or("localhost");
    format!("{}://{}", scheme, host)
}

pub fn plugin_manifest(base_url: &str) -> Value {
    json!({
        "schema_version": "v1",
        "name_for_human": "GoHighLevel MCP Bridge",
        "name_for_model": "gohighlevel_mcp",
        "description_for_human": "Bridge to connect an OpenAI Agent with GoHighLevel (CRM) sub-account features.",
        "description_for_model": "Tools to create/update contacts, send emails/SMS, manage opportunities, and schedule appointments via GoHighLevel API.",
        "auth": { "type": "none" },
        "api": {
            "type": "openapi",
            "url": format!("{}/openapi.json", base_url),
            "is_user_authenticated": false
        },
        "logo_url": "https://example.com/logo.png",
        "contact_email": "support@example.com",
        "legal_info_url": "https://example.com/terms"
    })
}

pub async fn serve_manifest(headers: HeaderMap) -> Json<Value> {
    Json(plugin_manifest(&base_url(&headers)))
}

fn string_props(names: &[&str]) -> Value {
    let props: serde_json::Map<String, Value> = names
        .iter()
        .map(|name| (name.to_string(), json!({ "type": "string" })))
        .collect();
    Value::Object(props)
}

fn json_body(schema: &str) -> Value {
    json!({
        "required": true,
        "content": {
            "application/json": {
                "schema": { "$ref": format!("#/components/schemas/{}", schema) }
            }
        }
    })
}

fn query_param(name: &str, required: bool) -> Value {
    json!({ "name": name, "in": "query", "required": required, "schema": { "type": "string" } })
}

fn path_param(name: &str) -> Value {
    json!({ "name": name, "in": "path", "required": true, "schema": { "type": "string" } })
}

fn operation(summary: &str, operation_id: &str) -> Value {
    json!({
        "summary": summary,
        "operationId": operation_id,
        "responses": { "default": { "description": "Upstream response, relayed unchanged" } }
    })
}

fn with(mut op: Value, key: &str, value: Value) -> Value {
    op[key] = value;
    op
}

fn paths() -> Value {
    let mut paths = serde_json::Map::new();
    let mut add = |path: &str, item: Value| {
        paths.insert(path.to_string(), item);
    };

    add(
        "/contacts",
        json!({ "post": with(operation("Create a new contact", "create_contact"), "requestBody", json_body("ContactCreate")) }),
    );
    add(
        "/contacts/{contact_id}",
        json!({ "put": with(
            with(operation("Update an existing contact", "update_contact"), "requestBody", json_body("ContactUpdate")),
            "parameters",
            json!([path_param("contact_id")]),
        ) }),
    );
    add(
        "/send_sms",
        json!({ "post": with(operation("Send an SMS to a contact", "send_sms"), "requestBody", json_body("SmsRequest")) }),
    );
    add(
        "/send_email",
        json!({ "post": with(operation("Send an Email to a contact", "send_email"), "requestBody", json_body("EmailRequest")) }),
    );
    add(
        "/pipelines",
        json!({ "get": operation("Get available pipelines and stages", "get_pipelines") }),
    );
    add(
        "/opportunities",
        json!({ "post": with(operation("Create a new opportunity (deal)", "create_opportunity"), "requestBody", json_body("OpportunityCreate")) }),
    );
    add(
        "/opportunities/{opportunity_id}",
        json!({ "put": with(
            with(operation("Update an existing opportunity", "update_opportunity"), "requestBody", json_body("OpportunityUpdate")),
            "parameters",
            json!([path_param("opportunity_id")]),
        ) }),
    );
    add(
        "/add_to_campaign",
        json!({ "post": with(
            operation("Add contact to a campaign", "add_to_campaign"),
            "parameters",
            json!([query_param("contactId", true), query_param("campaignId", true)]),
        ) }),
    );
    add(
        "/add_to_workflow",
        json!({ "post": with(
            operation("Add contact to a workflow", "add_to_workflow"),
            "parameters",
            json!([query_param("contactId", true), query_param("workflowId", true)]),
        ) }),
    );
    add(
        "/appointments",
        json!({
            "post": with(operation("Book an appointment for a contact", "create_appointment"), "requestBody", json_body("AppointmentCreate")),
            "get": with(
                operation("List appointments in a date range", "list_appointments"),
                "parameters",
                json!([
                    query_param("calendarId", false),
                    query_param("startTime", false),
                    query_param("endTime", false),
                ]),
            ),
        }),
    );

    Value::Object(paths)
}

fn object_schema(required: &[&str], properties: &[&str]) -> Value {
    let mut schema = json!({
        "type": "object",
        "properties": string_props(properties),
    });
    if !required.is_empty() {
        schema["required"] = json!(required);
    }
    schema
}

fn schemas() -> Value {
    let contact_fields = ["firstName", "lastName", "email", "phone"];
    json!({
        "ContactCreate": object_schema(&[], &contact_fields),
        "ContactUpdate": object_schema(&[], &contact_fields),
        "SmsRequest": object_schema(&["contactId", "message"], &["contactId", "message"]),
        "EmailRequest": object_schema(&["contactId", "subject", "body"], &["contactId", "subject", "body"]),
        "OpportunityCreate": object_schema(
            &["name", "contactId", "pipelineId", "pipelineStageId"],
            &["name", "contactId", "pipelineId", "pipelineStageId", "status"],
        ),
        "OpportunityUpdate": object_schema(&[], &["name", "pipelineId", "pipelineStageId", "status"]),
        "AppointmentCreate": object_schema(&["contactId", "startTime"], &["contactId", "startTime", "calendarId"]),
    })
}

/// OpenAPI description of the bridge, referenced by the plugin manifest.
pub fn openapi_document() -> Value {
    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "GoHighLevel MCP Bridge",
            "description": "Bridge to the GoHighLevel API",
            "version": env!("CARGO_PKG_VERSION")
        },
        "paths": paths(),
        "components": { "schemas": schemas() }
    })
}

pub async fn serve_openapi() -> Json<Value> {
    Json(openapi_document())
}
