use std::path::Path;

use crate::runner::RunResult;

/// A saved harness report.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Report {
    pub label: String,
    pub config_path: Option<String>,
    pub result: RunResult,
}

/// Load a report from a JSON file. Returns None if missing or unreadable.
pub fn load_report(path: &Path) -> Option<Report> {
    let contents = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&contents).ok()
}

/// Save a report as pretty-printed JSON, creating parent directories.
pub fn save_report(path: &Path, report: &Report) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(report).map_err(std::io::Error::other)?;
    std::fs::write(path, json)
}

fn opt<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Format a run as a markdown summary table.
pub fn format_markdown(r: &RunResult) -> String {
    let mut out = String::new();
    out.push_str("| Metric | Value |\n");
    out.push_str("|--------|-------|\n");
    let rows = [
        ("Seed", r.seed.to_string()),
        ("Outcome", r.outcome.clone()),
        ("Ticks", r.ticks_run.to_string()),
        ("Simulated (s)", format!("{:.2}", r.simulated_ms as f64 / 1000.0)),
        ("Score", r.score.to_string()),
        ("Arena entered (ms)", opt(r.arena_entered_at_ms)),
        ("Boss health", opt(r.boss_health.map(|h| format!("{h:.0}")))),
        ("Boss phase", opt(r.boss_phase)),
        ("Player health", format!("{:.1}", r.player_health)),
        ("Chunks generated", r.chunks_generated.to_string()),
        (
            "Max visible trees/ponds/bushes",
            format!(
                "{}/{}/{}",
                r.max_visible_trees, r.max_visible_ponds, r.max_visible_bushes
            ),
        ),
        (
            "Grunts spawned/killed",
            format!("{}/{}", r.grunts_spawned, r.grunts_killed),
        ),
        ("Shots fired", r.shots_fired.to_string()),
        ("Boss projectiles", r.boss_projectiles.to_string()),
        ("Hazards spawned", r.hazards_spawned.to_string()),
        ("Damage taken", format!("{:.1}", r.damage_taken)),
        ("Damage dealt", format!("{:.1}", r.damage_dealt)),
    ];
    for (name, value) in rows {
        out.push_str(&format!("| {} | {} |\n", name, value));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RunResult {
        RunResult {
            seed: 42,
            ticks_run: 600,
            simulated_ms: 10_000,
            outcome: "unfinished".to_string(),
            score: 30,
            arena_entered_at_ms: None,
            boss_health: None,
            boss_phase: None,
            player_health: 87.5,
            chunks_generated: 12,
            max_visible_trees: 40,
            max_visible_ponds: 9,
            max_visible_bushes: 25,
            grunts_spawned: 9,
            grunts_killed: 3,
            shots_fired: 30,
            boss_projectiles: 0,
            hazards_spawned: 0,
            damage_taken: 12.5,
            damage_dealt: 300.0,
        }
    }

    #[test]
    fn test_markdown_rows() {
        let md = format_markdown(&sample());
        assert!(md.starts_with("| Metric | Value |"));
        assert!(md.contains("| Seed | 42 |"));
        assert!(md.contains("| Arena entered (ms) | - |"));
        assert!(md.contains("| Max visible trees/ponds/bushes | 40/9/25 |"));
        assert!(md.contains("| Simulated (s) | 10.00 |"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("arena-harness-{}", std::process::id()));
        let path = dir.join("nested").join("report.json");
        let report = Report {
            label: "test".to_string(),
            config_path: None,
            result: sample(),
        };
        save_report(&path, &report).expect("write report");
        let loaded = load_report(&path).expect("read report back");
        assert_eq!(loaded.result, report.result);
        assert_eq!(loaded.label, "test");
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_report_is_none() {
        assert!(load_report(Path::new("/nonexistent/arena-report.json")).is_none());
    }
}
