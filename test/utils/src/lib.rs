pub fn generation_fixture() -> &'static str {
    return r#"
{
    "id": "6f1c2a9e-3b7d-4c55-9a8e-0d2f4b7c1e90",
    "command": "Write a product description",
    "structured_prompt": "CONTEXT:\nYou are writing for an online store.\n\nTASK:\nWrite a product description.",
    "system_prompt": "You are an expert copywriter. Write concise, persuasive product descriptions.",
    "created_at": "2025-01-01T00:00:00.000000"
}
"#
    .trim();
}

pub fn missing_fields_fixture() -> &'static str {
    return r#"
{
    "command": "Write a product description",
    "structured_prompt": "CONTEXT:\nYou are writing for an online store.",
    "created_at": "2025-01-01T00:00:00Z"
}
"#
    .trim();
}
