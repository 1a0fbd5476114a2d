use clap::{Args, Parser, Subcommand};

use crate::types::{Intensity, SessionType, SkillLevel};

#[derive(Parser)]
#[command(name = "courtside", version, about = "CLI basketball training companion")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Training plan generation
    #[command(subcommand, visible_alias = "p")]
    Plan(PlanCmd),

    /// Session-scoped commands
    #[command(subcommand, visible_alias = "s")]
    Session(SessionCmd),

    /// Content catalog management
    #[command(subcommand, visible_alias = "cat")]
    Catalog(CatalogCmd),

    /// View or edit the athlete profile
    #[command(subcommand)]
    Profile(ProfileCmd),

    /// View or edit courtside config
    #[command(subcommand)]
    Config(ConfigCmd),

    /// Show training sessions in a calendar view
    #[command(visible_alias = "cal")]
    Calendar {
        /// Year to show (defaults to current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Month to show (1-12, defaults to current month)
        #[arg(short, long)]
        month: Option<u32>,
    },

    /// Show weekly progress, streaks, XP and badges
    Status {
        /// Show a graph of weekly completed minutes
        #[arg(short, long)]
        graph: bool,

        /// Number of most recent weeks to show
        #[arg(short, long, default_value = "12")]
        weeks: usize,
    },
}

//
// Commands
//

#[derive(Subcommand)]
pub enum PlanCmd {
    /// Generate a plan from the stored profile
    #[command(visible_alias = "g")]
    Generate(GenerateArgs),

    /// Show the last generated plan
    #[command(visible_alias = "s")]
    Show,

    /// Flatten the last generated plan into the session store
    #[command(visible_alias = "a")]
    Apply {
        /// First training date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        start: Option<String>,
    },
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Plan length in weeks
    #[arg(short, long, default_value = "4")]
    pub weeks: u32,

    /// Seed for reproducible drill selection
    #[arg(long)]
    pub seed: Option<u64>,

    /// Apply the plan to the session store right away
    #[arg(long)]
    pub apply: bool,

    /// First training date when applying (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub start: Option<String>,
}

#[derive(Subcommand)]
pub enum SessionCmd {
    /// Add an ad-hoc session
    #[command(visible_alias = "a")]
    Add {
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Session type
        #[arg(short = 't', long, value_enum, default_value = "skills")]
        session_type: SessionType,

        /// Total minutes
        #[arg(short, long)]
        minutes: u32,

        /// Drill entries as NAME:CATEGORY:MINUTES (repeatable)
        #[arg(short = 'D', long = "drill")]
        drills: Vec<String>,

        /// Mark the session completed right away
        #[arg(short, long)]
        completed: bool,
    },

    /// List sessions
    #[command(visible_alias = "l")]
    List,

    /// Toggle completion on a session - Usage: session complete INDEX
    #[command(visible_alias = "c")]
    Complete {
        /// 1-based index from `session list`
        session: usize,
    },

    /// Delete a session
    #[command(visible_alias = "d")]
    Delete {
        /// 1-based index from `session list`
        session: usize,
    },

    /// Show sessions from a specific date
    Log {
        /// Date in YYYY-MM-DD format
        #[arg(short, long)]
        date: String,
    },
}

#[derive(Subcommand)]
pub enum CatalogCmd {
    /// List catalog items
    #[command(visible_alias = "l")]
    List {
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Import drills, exercises and stretches from a TOML file
    #[command(visible_alias = "i")]
    Import {
        /// Path to TOML file
        file: String,
    },
}

#[derive(Subcommand)]
pub enum ProfileCmd {
    /// Show the stored profile
    Show,

    /// Update one or more profile fields
    Set(SetProfileArgs),
}

#[derive(Args)]
pub struct SetProfileArgs {
    /// Skill level
    #[arg(long, value_enum)]
    pub skill_level: Option<SkillLevel>,

    /// Minutes available per session
    #[arg(long)]
    pub minutes: Option<u32>,

    /// Sessions per week (1-7)
    #[arg(long)]
    pub frequency: Option<u32>,

    /// Comma-separated goal labels
    #[arg(long)]
    pub goals: Option<String>,

    /// Comma-separated focus areas
    #[arg(long)]
    pub focus: Option<String>,

    /// Comma-separated owned equipment
    #[arg(long)]
    pub equipment: Option<String>,

    /// Comma-separated injuries or limitations
    #[arg(long)]
    pub limitations: Option<String>,

    /// Preferred intensity
    #[arg(long, value_enum)]
    pub intensity: Option<Intensity>,

    /// Preferred session type
    #[arg(long, value_enum)]
    pub session_type: Option<SessionType>,

    /// Warmup minutes
    #[arg(long)]
    pub warmup: Option<u32>,

    /// Cooldown minutes
    #[arg(long)]
    pub cooldown: Option<u32>,
}

#[derive(Subcommand)]
pub enum ConfigCmd {
    /// Show all config keys
    List,

    /// Get the value of a key
    Get { key: String },

    /// Set or override a key
    Set { key: String, val: String },

    /// Remove a key
    Unset { key: String },
}
