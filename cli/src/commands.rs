use relink_core::context::{MeterSettingsExt, load_encounter_log};
use relink_core::encounter::local_time;
use relink_core::{
    CondenseStrategy, PlayerBreakdown, SeriesConfig, SummaryContext, Translator,
    build_breakdowns, build_damage_series, build_gauge_series, compute_computed_players,
    entry_label, format_full_summary, format_simple_summary, player_name, primary_target,
    sort_players, target_label,
};
use relink_types::formatting::{
    format_elapsed, format_gauge, format_humanized, format_pct2, format_thousands,
};
use relink_types::{
    ComputedSkillGroup, DamageSeriesPoint, EncounterLog, GaugeSeriesPoint, MeterColumn,
    MeterSettings, PartyMember, SortDirection,
};
use std::path::PathBuf;

use crate::context::{CliContext, LoadedLog, LogHandle};

async fn require_log(ctx: &CliContext) -> Result<LogHandle, String> {
    ctx.log()
        .await
        .ok_or_else(|| "No log loaded, use `load --path <file>` first\n".to_string())
}

async fn read_log(path: PathBuf) -> Result<EncounterLog, String> {
    tokio::task::spawn_blocking(move || load_encounter_log(&path))
        .await
        .map_err(|e| format!("log load task failed: {}\n", e))?
        .map_err(|e| match std::error::Error::source(&e) {
            Some(source) => format!("{}: {}\n", e, source),
            None => format!("{}\n", e),
        })
}

pub async fn load(path: &str, ctx: &CliContext) -> Result<(), String> {
    let path = PathBuf::from(path);
    let log = read_log(path.clone()).await?;

    let state = &log.encounter_state;
    println!(
        "Loaded {} ({} players, {} damage over {})",
        path.display(),
        state.players.len(),
        format_thousands(state.total_damage),
        format_elapsed(state.duration_ms())
    );
    println!("Started: {} ({:?})", local_time(state.start_time), state.status);

    let resources = ctx.resources.read().await;
    if let Some(target) = primary_target(state) {
        println!("Target: {}", target_label(&resources.catalog, &target.target_type));
    }
    drop(resources);

    ctx.set_log(LoadedLog { path, log }).await;
    show_meter(ctx).await
}

/// Print the player table in the current sort order.
pub async fn show_meter(ctx: &CliContext) -> Result<(), String> {
    let loaded = require_log(ctx).await?;
    let settings = ctx.settings.read().await;
    let resources = ctx.resources.read().await;
    let sort = *ctx.sort.read().await;

    let players = sort_players(
        &compute_computed_players(&loaded.log.encounter_state),
        sort.column,
        sort.direction,
    );

    println!(
        "{:<36} {:>10} {:>10} {:>8} {:>8}",
        header("Name", MeterColumn::PartySlot, sort.column, sort.direction),
        header("DMG", MeterColumn::TotalDamage, sort.column, sort.direction),
        header("DPS", MeterColumn::Dps, sort.column, sort.direction),
        header("%", MeterColumn::Percentage, sort.column, sort.direction),
        header("SBA", MeterColumn::Gauge, sort.column, sort.direction),
    );
    println!("{}", "-".repeat(76));
    for player in &players {
        println!(
            "{:<36} {:>10} {:>10} {:>8} {:>8}",
            player_name(
                &resources.catalog,
                &loaded.log.players,
                player,
                settings.show_display_names
            ),
            format_humanized(player.player.total_damage as f64),
            format_humanized(player.player.dps),
            format_pct2(player.percentage),
            format_gauge(player.player.gauge),
        );
    }
    Ok(())
}

fn header(label: &str, column: MeterColumn, selected: MeterColumn, direction: SortDirection) -> String {
    if column != selected {
        return label.to_string();
    }
    match direction {
        SortDirection::Asc => format!("{} ^", label),
        SortDirection::Desc => format!("{} v", label),
    }
}

pub async fn sort(column: &str, direction: Option<&str>, ctx: &CliContext) -> Result<(), String> {
    let column = MeterColumn::from_key(column).ok_or_else(|| {
        let keys: Vec<&str> = MeterColumn::ALL.iter().map(|c| c.key()).collect();
        format!("unknown column '{}', expected one of: {}\n", column, keys.join(", "))
    })?;

    {
        let mut sort = ctx.sort.write().await;
        match direction {
            Some(key) => {
                let direction = SortDirection::from_key(key)
                    .ok_or_else(|| format!("unknown direction '{}', expected asc or desc\n", key))?;
                sort.column = column;
                sort.direction = direction;
            }
            None => sort.select(column),
        }
    }

    show_meter(ctx).await
}

async fn breakdowns(ctx: &CliContext, loaded: &LoadedLog) -> Vec<PlayerBreakdown> {
    let settings = ctx.settings.read().await;
    let resources = ctx.resources.read().await;
    let sort = *ctx.sort.read().await;

    let strategy = CondenseStrategy::select(
        settings.use_condensed_skills,
        resources.table.as_ref(),
        &resources.catalog,
    );
    tracing::debug!(strategy = ?strategy, "Building skill breakdowns");

    build_breakdowns(&loaded.log.encounter_state, sort.column, sort.direction, &strategy)
}

pub async fn summary(full: bool, ctx: &CliContext) -> Result<(), String> {
    let loaded = require_log(ctx).await?;
    let rows = breakdowns(ctx, &loaded).await;

    let settings = ctx.settings.read().await;
    let resources = ctx.resources.read().await;
    let summary_ctx = SummaryContext {
        translator: &resources.catalog,
        roster: &loaded.log.players,
        show_display_names: settings.show_display_names,
    };

    let state = &loaded.log.encounter_state;
    let text = if full {
        format_full_summary(state, &rows, &summary_ctx)
    } else {
        let players: Vec<_> = rows.into_iter().map(|r| r.player).collect();
        format_simple_summary(state, &players, &summary_ctx)
    };

    match text {
        Some(text) => println!("{}", text),
        None => println!("Nothing to copy!"),
    }
    Ok(())
}

pub async fn skills(player_id: u32, ctx: &CliContext) -> Result<(), String> {
    let loaded = require_log(ctx).await?;
    let rows = breakdowns(ctx, &loaded).await;
    let breakdown = rows
        .iter()
        .find(|r| r.player.player.id == player_id)
        .ok_or_else(|| format!("no player with id {}\n", player_id))?;

    let settings = ctx.settings.read().await;
    let resources = ctx.resources.read().await;
    let translator: &dyn Translator = &resources.catalog;
    let owner = &breakdown.player.player.character_type;

    println!(
        "{}",
        player_name(translator, &loaded.log.players, &breakdown.player, settings.show_display_names)
    );
    println!(
        "{:<36} {:>6} {:>10} {:>8} {:>8} {:>8} {:>8}",
        "Skill", "Hits", "Total", "Min", "Max", "Avg", "%"
    );
    println!("{}", "-".repeat(92));
    for row in &breakdown.skills {
        println!("{}", skill_row(translator, owner, row, ""));
        for member in &row.members {
            println!("{}", skill_row(translator, owner, member, "  "));
        }
    }
    Ok(())
}

fn skill_row(
    translator: &dyn Translator,
    owner: &relink_types::CharacterType,
    row: &ComputedSkillGroup,
    indent: &str,
) -> String {
    let opt = |v: Option<u64>| v.map(|v| format_humanized(v as f64)).unwrap_or_default();
    format!(
        "{:<36} {:>6} {:>10} {:>8} {:>8} {:>8} {:>8}",
        format!("{}{}", indent, entry_label(translator, owner, row)),
        row.hits,
        format_humanized(row.total_damage as f64),
        opt(row.min_damage),
        opt(row.max_damage),
        format_humanized(row.average_hit()),
        format_pct2(row.percentage),
    )
}

fn series_names(
    translator: &dyn Translator,
    roster: &[Option<PartyMember>],
    settings: &MeterSettings,
    loaded: &LoadedLog,
) -> Vec<(u32, String)> {
    compute_computed_players(&loaded.log.encounter_state)
        .iter()
        .map(|p| {
            (
                p.player.id,
                player_name(translator, roster, p, settings.show_display_names),
            )
        })
        .collect()
}

pub async fn chart(ctx: &CliContext) -> Result<(), String> {
    let loaded = require_log(ctx).await?;
    let settings = ctx.settings.read().await;
    let resources = ctx.resources.read().await;

    let names = series_names(&resources.catalog, &loaded.log.players, &settings, &loaded);
    let ids: Vec<u32> = names.iter().map(|(id, _)| *id).collect();
    let series = build_damage_series(
        &loaded.log.dps_chart,
        &ids,
        loaded.log.chart_len,
        &SeriesConfig::from_settings(&settings),
    );

    print!("{}", render_damage_series(&series, &names));
    Ok(())
}

pub async fn gauge(ctx: &CliContext) -> Result<(), String> {
    let loaded = require_log(ctx).await?;
    let settings = ctx.settings.read().await;
    let resources = ctx.resources.read().await;

    let names = series_names(&resources.catalog, &loaded.log.players, &settings, &loaded);
    let ids: Vec<u32> = names.iter().map(|(id, _)| *id).collect();
    let series = build_gauge_series(&loaded.log.sba_chart, &ids, loaded.log.sba_chart_len);

    print!("{}", render_gauge_series(&series, &names));
    Ok(())
}

fn render_damage_series(series: &[DamageSeriesPoint], names: &[(u32, String)]) -> String {
    let mut out = format!("{:<8} {:>10}", "Time", "Party");
    for (_, name) in names {
        out.push_str(&format!(" | {}", name));
    }
    out.push('\n');
    for point in series {
        out.push_str(&format!("{:<8} {:>10}", point.timestamp, point.party));
        for (id, _) in names {
            let value = point.players.get(id).copied().unwrap_or(0);
            out.push_str(&format!(" | {}", value));
        }
        out.push('\n');
    }
    out
}

fn render_gauge_series(series: &[GaugeSeriesPoint], names: &[(u32, String)]) -> String {
    let mut out = format!("{:<8}", "Time");
    for (_, name) in names {
        out.push_str(&format!(" | {}", name));
    }
    out.push('\n');
    for point in series {
        out.push_str(&format!("{:<8}", point.timestamp));
        for (id, _) in names {
            let value = point.players.get(id).copied().unwrap_or(0.0);
            out.push_str(&format!(" | {:.1}%", value));
        }
        out.push('\n');
    }
    out
}

pub async fn show_settings(ctx: &CliContext) -> Result<(), String> {
    let settings = ctx.settings.read().await;
    let resources = ctx.resources.read().await;

    match MeterSettings::config_path() {
        Ok(path) => println!("Config file: {}", path.display()),
        Err(err) => println!("Config file: unavailable ({})", err),
    }
    println!("use_condensed_skills: {}", settings.use_condensed_skills);
    println!("show_display_names: {}", settings.show_display_names);
    println!("dps_interval_secs: {}", settings.dps_interval_secs);
    println!("smoothing_window: {}", settings.smoothing_window);
    println!(
        "sort: {} {:?}",
        settings.sort_column.key(),
        settings.sort_direction
    );
    println!(
        "skill_groups_path: {}",
        settings
            .skill_groups_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none, grouping by name)".to_string())
    );
    println!(
        "locale_path: {} ({} entries)",
        settings
            .locale_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none)".to_string()),
        resources.catalog.len()
    );
    Ok(())
}

pub async fn reload(ctx: &CliContext) -> Result<(), String> {
    ctx.reload_settings().await;
    show_settings(ctx).await
}

pub fn exit() {
    println!("quitting...");
}
