mod commands;
mod render;
mod utils;

use std::path::PathBuf;

use agenda_core::agenda::CalendarScope;
use agenda_core::event::Recurrence;
use agenda_core::pedagogical::AttendanceStatus;
use agenda_core::student::ProgressStatus;
use agenda_core::summary::ProfileTab;
use agenda_core::task::Priority;
use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "agenda")]
#[command(about = "Calendar, tasks and pedagogical tracking for preschool teachers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with email and password
    Login {
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Create an account and sign in
    Register {
        #[arg(short, long)]
        email: Option<String>,

        /// Full name shown to the backend
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Use an existing access token
    Token { token: String },
    /// Forget the stored token
    Logout,

    /// Today's summary
    Home,
    /// Agenda for a day, week or month
    Calendar {
        #[arg(short, long, default_value = "week")]
        scope: CalendarScope,

        /// Any date inside the window (default: today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Export the agenda for a day, week or month
    Export {
        #[arg(short, long, default_value = "week")]
        scope: CalendarScope,

        #[arg(short, long)]
        date: Option<NaiveDate>,

        #[arg(short, long, value_enum, default_value_t = ExportFormat::Pdf)]
        format: ExportFormat,

        /// Directory to write into (default: current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Calendar events
    #[command(subcommand)]
    Event(EventCommand),
    /// Tasks
    #[command(subcommand)]
    Task(TaskCommand),
    /// Reminders
    #[command(subcommand)]
    Reminder(ReminderCommand),
    /// Students and their profiles
    #[command(subcommand)]
    Student(StudentCommand),
    /// Record attendance for a student
    Attendance {
        student: i64,
        status: AttendanceStatus,

        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Record an observation about a student
    Observation {
        student: i64,
        notes: String,

        /// Behavior or mood
        #[arg(short, long)]
        mood: Option<String>,

        #[arg(short, long)]
        participation: Option<String>,

        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Record a content topic worked on
    Content {
        topic: String,

        /// Attach to one student instead of the whole group
        #[arg(short, long)]
        student: Option<i64>,

        #[arg(short, long)]
        notes: Option<String>,

        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Weekly lesson planning
    #[command(subcommand)]
    Planning(PlanningCommand),
    /// Status overview of every student
    Tracking,
    /// Settings and reminders
    Settings,
}

#[derive(Subcommand)]
enum EventCommand {
    /// Create an event (prompts for anything missing)
    New {
        title: Option<String>,

        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Start time (HH:MM)
        #[arg(short, long)]
        start: Option<NaiveTime>,

        /// End time (HH:MM)
        #[arg(short, long)]
        end: Option<NaiveTime>,

        #[arg(short, long)]
        category: Option<String>,

        #[arg(short, long)]
        location: Option<String>,

        #[arg(long)]
        notes: Option<String>,

        #[arg(short, long)]
        recurrence: Option<Recurrence>,

        /// RRULE body for custom recurrence, e.g. "FREQ=WEEKLY;BYDAY=MO,WE"
        #[arg(long)]
        rule: Option<String>,
    },
}

#[derive(Subcommand)]
enum TaskCommand {
    New {
        title: String,

        #[arg(short, long)]
        due: Option<NaiveDate>,

        #[arg(short, long, default_value = "medium")]
        priority: Priority,

        #[arg(short, long)]
        notes: Option<String>,

        /// Link the task to an event
        #[arg(short, long)]
        event: Option<i64>,
    },
    List,
    /// Mark done, or open again
    Toggle { id: i64 },
}

#[derive(Subcommand)]
enum ReminderCommand {
    New {
        /// Minutes before the event or task
        minutes: u32,

        #[arg(short, long)]
        message: Option<String>,

        /// Send as part of the daily summary
        #[arg(long)]
        daily: bool,
    },
    List,
}

#[derive(Subcommand)]
enum StudentCommand {
    New {
        full_name: String,

        #[arg(short, long)]
        age: Option<u32>,

        #[arg(short, long)]
        birthday: Option<NaiveDate>,

        /// Room or group, e.g. "Sala de 4"
        #[arg(short, long)]
        group: Option<String>,

        /// Family contact
        #[arg(short, long)]
        contact: Option<String>,
    },
    List {
        /// Filter by name
        #[arg(short, long)]
        search: Option<String>,
    },
    /// A student's profile
    Show {
        id: i64,

        /// seguimiento, asistencias, observaciones or contenidos
        #[arg(short, long, default_value = "seguimiento")]
        tab: ProfileTab,
    },
    /// Change a student's progress status
    Status { id: i64, status: ProgressStatus },
}

#[derive(Subcommand)]
enum PlanningCommand {
    New {
        /// Monday of the planned week
        week_start: NaiveDate,
        weekday: String,
        activities: String,
    },
    List,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    Pdf,
    Ics,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("AGENDA_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Login { email } => commands::auth::login(email).await,
        Commands::Register { email, name } => commands::auth::register(email, name).await,
        Commands::Token { token } => commands::auth::token(&token).await,
        Commands::Logout => commands::auth::logout(),
        Commands::Home => commands::home::run().await,
        Commands::Calendar { scope, date } => commands::calendar::show(scope, date).await,
        Commands::Export {
            scope,
            date,
            format,
            output,
        } => commands::calendar::export(scope, date, format, output).await,
        Commands::Event(EventCommand::New {
            title,
            date,
            start,
            end,
            category,
            location,
            notes,
            recurrence,
            rule,
        }) => {
            let form = commands::calendar::EventForm {
                title,
                date,
                start,
                end,
                category,
                location,
                notes,
                recurrence,
                rule,
            };
            commands::calendar::new_event(form).await
        }
        Commands::Task(TaskCommand::New {
            title,
            due,
            priority,
            notes,
            event,
        }) => commands::tasks::new_task(title, due, priority, notes, event).await,
        Commands::Task(TaskCommand::List) => commands::tasks::list().await,
        Commands::Task(TaskCommand::Toggle { id }) => commands::tasks::toggle(id).await,
        Commands::Reminder(ReminderCommand::New {
            minutes,
            message,
            daily,
        }) => commands::settings::new_reminder(minutes, message, daily).await,
        Commands::Reminder(ReminderCommand::List) | Commands::Settings => {
            commands::settings::run().await
        }
        Commands::Student(StudentCommand::New {
            full_name,
            age,
            birthday,
            group,
            contact,
        }) => commands::students::new_student(full_name, age, birthday, group, contact).await,
        Commands::Student(StudentCommand::List { search }) => {
            commands::students::list(search.as_deref()).await
        }
        Commands::Student(StudentCommand::Show { id, tab }) => {
            commands::students::show(id, tab).await
        }
        Commands::Student(StudentCommand::Status { id, status }) => {
            commands::students::set_status(id, status).await
        }
        Commands::Attendance {
            student,
            status,
            date,
        } => commands::students::attendance(student, status, date).await,
        Commands::Observation {
            student,
            notes,
            mood,
            participation,
            date,
        } => commands::students::observation(student, notes, mood, participation, date).await,
        Commands::Content {
            topic,
            student,
            notes,
            date,
        } => commands::students::content(topic, student, notes, date).await,
        Commands::Planning(PlanningCommand::New {
            week_start,
            weekday,
            activities,
        }) => commands::home::new_planning(week_start, weekday, activities).await,
        Commands::Planning(PlanningCommand::List) => commands::home::plannings().await,
        Commands::Tracking => commands::tracking::run().await,
    }
}
