use anyhow::Result;

use super::build;
use super::command_text;
use super::format_generation;
use super::format_health;
use crate::domain::models::GenerationResult;
use crate::domain::models::HealthStatus;

#[test]
fn it_builds_a_valid_command() {
    build().debug_assert();
}

#[test]
fn it_joins_generate_words() -> Result<()> {
    let matches = build().try_get_matches_from(vec![
        "promptsmith",
        "generate",
        "Write",
        "a",
        "blog post",
    ])?;
    let (_, generate_matches) = matches.subcommand().unwrap();

    assert_eq!(command_text(generate_matches), "Write a blog post");
    assert!(!generate_matches.get_flag("json"));

    return Ok(());
}

#[test]
fn it_requires_a_command_to_generate() {
    let res = build().try_get_matches_from(vec!["promptsmith", "generate"]);
    assert!(res.is_err());
}

#[test]
fn it_accepts_global_flags_after_subcommands() -> Result<()> {
    let matches = build().try_get_matches_from(vec![
        "promptsmith",
        "get",
        "--id",
        "abc",
        "--json",
        "--backend-url",
        "http://localhost:9000",
    ])?;
    let (_, get_matches) = matches.subcommand().unwrap();

    assert_eq!(get_matches.get_one::<String>("id").unwrap(), "abc");
    assert_eq!(
        get_matches.get_one::<String>("backend-url").unwrap(),
        "http://localhost:9000"
    );

    return Ok(());
}

#[test]
fn it_formats_generations() {
    let res = GenerationResult {
        id: Some("abc".to_string()),
        command: "X".to_string(),
        structured_prompt: "S\n".to_string(),
        system_prompt: "P".to_string(),
        created_at: "unknown".to_string(),
    };
    let text = format_generation(&res);

    assert!(text.contains("S\n\n"));
    assert!(text.ends_with("P\n\nOriginal Command: \"X\"\nGenerated: unknown\nID: abc"));
}

#[test]
fn it_formats_health() {
    let status = HealthStatus {
        status: "healthy".to_string(),
        llm_key_configured: false,
    };

    insta::assert_snapshot!(format_health(&status), @r###"
    Status: healthy
    LLM key configured: no
    "###);
}
