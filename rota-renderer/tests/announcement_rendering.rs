use chrono::NaiveDate;
use rota_core::{DutyAssignment, GroupId, IdentifierMapping, PersonName};
use rota_renderer::{AnnouncementContext, Renderer, WEEKLY_TEMPLATE};
use tempfile::TempDir;

fn names(list: &[&str]) -> Vec<PersonName> {
    list.iter().map(|n| PersonName::from(*n)).collect()
}

fn week() -> (NaiveDate, DutyAssignment) {
    (
        NaiveDate::from_ymd_opt(2026, 2, 16).expect("date"),
        DutyAssignment::new(names(&["Daniele", "Joep", "Fabio"]), names(&["Michael", "Luis"])),
    )
}

fn mapping() -> IdentifierMapping {
    IdentifierMapping::from_pairs([
        ("Fabio", "U12345678"),
        ("Michael", "U23456789"),
        ("Luis", "U34567890"),
        ("Daniele", "U45678901"),
    ])
    .expect("mapping")
}

#[test]
fn full_week_renders_with_mixed_mentions() {
    let (date, assignment) = week();
    let mapping = mapping();
    let ctx = AnnouncementContext::build(date, &assignment, Some(&mapping), None);
    let text = Renderer::new().expect("renderer").render(&ctx).expect("render");

    assert!(text.starts_with(":calendar: *Weekly Schedule for week of Feb 16, 2026*"));
    assert!(text.contains(
        ":hammer_and_wrench: *Release Artistry:* <@U45678901>, @Joep, <@U12345678>"
    ));
    assert!(text.contains(":dart: *Focused Work:* <@U23456789>, <@U34567890>"));
    assert!(!text.contains("subteam"));
}

#[test]
fn group_mention_is_rendered_when_configured() {
    let (date, assignment) = week();
    let group = GroupId::from("S0ART");
    let ctx = AnnouncementContext::build(date, &assignment, None, Some(&group));
    let text = Renderer::new().expect("renderer").render(&ctx).expect("render");
    assert!(text.contains("<!subteam^S0ART>"), "{text}");
}

#[test]
fn user_template_overrides_builtin() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(
        dir.path().join(WEEKLY_TEMPLATE),
        "Week {{ week_of }}: {{ release_artistry | join(sep=\" & \") }}\n",
    )
    .expect("write template");
    std::fs::write(dir.path().join("notes.txt"), "ignored").expect("write other");

    let (date, assignment) = week();
    let ctx = AnnouncementContext::build(date, &assignment, None, None);
    let text = Renderer::with_template_dir(dir.path())
        .expect("renderer")
        .render(&ctx)
        .expect("render");
    assert_eq!(text, "Week Feb 16, 2026: @Daniele & @Joep & @Fabio");
}

#[test]
fn missing_template_dir_falls_back_to_builtin() {
    let dir = TempDir::new().expect("tempdir");
    let (date, assignment) = week();
    let ctx = AnnouncementContext::build(date, &assignment, None, None);
    let text = Renderer::with_template_dir(&dir.path().join("absent"))
        .expect("renderer")
        .render(&ctx)
        .expect("render");
    assert!(text.starts_with(":calendar:"));
}

#[test]
fn broken_user_template_is_a_template_error() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(dir.path().join(WEEKLY_TEMPLATE), "{{ unclosed").expect("write");
    let err = Renderer::with_template_dir(dir.path()).err().expect("must fail");
    assert!(err.to_string().contains("announcement template error"));
}
