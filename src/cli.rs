// src/cli.rs
use std::{
    error::Error,
    fmt::Write as _,
    path::PathBuf,
    thread,
    time::Instant,
};

use crate::{
    config::{consts::CONFIG_FILE, file as config_file, options::{AppOptions, RankDisplay, YesMatch}},
    data::Leaderboard,
    filter::{Query, Sort, View},
    progress::Progress,
    refresh::{RefreshController, RefreshState},
    source, stats,
};

pub const HELP: &str = include_str!("cli_help.txt");

#[derive(Clone, Debug, PartialEq)]
pub struct Params {
    pub options: AppOptions,
    pub query: Query,
    /// Write the view to `options.export.out_path()`
    pub export: bool,
    pub watch: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Help,
    Run(Params),
}

/// Entry point for the `cli` binary.
pub fn run() -> Result<(), Box<dyn Error>> {
    match parse_args(std::env::args().skip(1))? {
        Command::Help => {
            eprintln!("{HELP}");
            Ok(())
        }
        Command::Run(params) => run_with(params),
    }
}

/// Parse flags. `--config` is read first so flags override the file.
pub fn parse_args<I>(args: I) -> Result<Command, Box<dyn Error>>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();

    let config_path = args
        .iter()
        .position(|a| a == "--config")
        .map(|i| args.get(i + 1).cloned().ok_or("Missing value for --config"))
        .transpose()?
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

    let mut params = Params {
        options: config_file::load(&config_path)?,
        query: Query::default(),
        export: false,
        watch: false,
    };

    let mut it = args.into_iter();
    while let Some(a) = it.next() {
        let mut value = || it.next().ok_or_else(|| format!("Missing value for {a}"));
        match a.as_str() {
            "--config" => { value()?; }
            "-s" | "--source" => params.options.source.location = value()?,
            "-q" | "--search" => params.query.search = value()?,
            "--status" => params.query.status = value()?.parse()?,
            "--sort" => {
                let key = value()?.parse()?;
                params.query.sort = Sort { key, descending: params.query.sort.descending };
            }
            "--desc" => params.query.sort.descending = true,
            "--metric" => params.options.policy.metric = value()?.parse()?,
            "--completion" => params.options.policy.completion = value()?.parse()?,
            "--exact-yes" => params.options.policy.yes_match = YesMatch::Exact,
            "--renumber" => params.options.policy.rank_display = RankDisplay::Renumber,
            "-o" | "--out" => {
                params.options.export.out_path = Some(PathBuf::from(value()?));
                params.export = true;
            }
            "--export" => params.export = true,
            "--format" => params.options.export.format = value()?.parse()?,
            "-w" | "--watch" => params.watch = true,
            "--poll" => params.options.source.poll_secs = value()?.parse()?,
            "-h" | "--help" => return Ok(Command::Help),
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }

    Ok(Command::Run(params))
}

/// Prints reload progress to stderr.
struct CliProgress;

impl Progress for CliProgress {
    fn begin(&mut self, source: &str) { eprintln!("Loading {source}…"); }
    fn log(&mut self, msg: &str) { eprintln!("  {msg}"); }
    fn finish(&mut self, ok: bool) { if !ok { eprintln!("  failed"); } }
}

pub fn run_with(params: Params) -> Result<(), Box<dyn Error>> {
    let src = source::open(&params.options.source.location)?;
    let mut ctl = RefreshController::new(src, params.options.clone());

    ctl.start(Instant::now(), Some(&mut CliProgress));
    report(&ctl, &params)?;

    if ctl.state() == RefreshState::Error && !params.watch {
        return Err(ctl.error().unwrap_or("load failed").into());
    }

    while params.watch {
        thread::sleep(ctl.time_until_check(Instant::now()));
        if ctl.tick(Instant::now(), Some(&mut CliProgress)) {
            report(&ctl, &params)?;
        }
    }
    Ok(())
}

fn report(ctl: &RefreshController, params: &Params) -> Result<(), Box<dyn Error>> {
    if let Some(msg) = ctl.error_message() {
        eprintln!("{msg}");
    }
    let board = ctl.board();
    if board.is_empty() && ctl.state() == RefreshState::Error {
        return Ok(());
    }

    let opts = ctl.options();
    let view = View::build(board, &params.query, opts.policy.yes_match, opts.policy.rank_display);
    print!("{}", render_table(&view, opts.policy.yes_match));
    println!();
    print!("{}", render_summary(board, opts));
    if let Some(t) = ctl.last_modified() {
        println!("Last updated: {}", t.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M:%S"));
    }

    if params.export {
        let path = crate::file::write_export(&opts.export, &view)?;
        eprintln!("Wrote {}", path.display());
    }
    Ok(())
}

/// Fixed-width text table of a view.
pub fn render_table(view: &View, yes: YesMatch) -> String {
    let name_w = view
        .iter()
        .map(|(_, p)| p.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut out = s!();
    let _ = writeln!(
        out, "{:>4}  {:<name_w$}  {:>6}  {:>6}  {:<9}  {}",
        "#", "Name", "Badges", "Arcade", "Code", "Done"
    );
    for (rank, p) in view.iter() {
        let _ = writeln!(
            out, "{:>4}  {:<name_w$}  {:>6}  {:>6}  {:<9}  {}",
            rank,
            p.name,
            p.skill_badge_count,
            p.arcade_count,
            if p.is_redeemed(yes) { "redeemed" } else { "no" },
            if p.all_completed { "yes" } else { "no" },
        );
    }
    if view.is_empty() {
        out.push_str("  (no participants match)\n");
    }
    out
}

pub fn render_summary(board: &Leaderboard, opts: &AppOptions) -> String {
    let s = board.summary(opts);
    let mut out = s!();
    let _ = writeln!(
        out,
        "Total {} | completed {} | in progress {} | not started {} | redeemed {} | not redeemed {} | redeemed, not started {}",
        s.total, s.completed, s.in_progress, s.not_started, s.redeemed, s.not_redeemed, s.redeemed_not_started
    );
    let _ = writeln!(
        out,
        "{} skill badges: {} | arcade started: {}",
        opts.goals.skill_goal, s.skill_goal_reached, s.arcade_started
    );
    for t in stats::tiers(s.completed, &opts.goals) {
        let filled = (t.percent as usize) / 5;
        let _ = writeln!(
            out, "{:<7} [{:<20}] {:>3}% ({}/{})",
            t.label, "#".repeat(filled), t.raw_percent, s.completed, t.goal
        );
    }
    out
}
