use std::io::{BufRead, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use servis_client::{ServisClient, Transport};
use servis_console::forms::account::{LoginForm, RegisterForm};
use servis_console::forms::customer::{CustomerForm, CustomerType};
use servis_console::forms::device::{DeviceForm, ProductType};
use servis_console::pages::CreateMode;
use servis_console::pages::customers::CustomersPage;
use servis_console::pages::devices::DevicesPage;
use servis_console::pages::login::LoginPage;
use servis_console::pages::register::RegisterPage;
use servis_console::{
    ConsoleConfig, ConsoleError, DisplayConfig, FormClock, Navigation, Notification, Route,
    TableOptions, guard,
};
use servis_core::{RenderOptions, SortDirection};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "servis")]
#[command(about = "Teknik servis yönetim konsolu")]
#[command(
    after_help = "Environment:\n  SERVIS_CONFIG       JSON config file\n  SERVIS_API_BASE     API base URL\n  SERVIS_TOKEN_FILE   Session token file (empty: in-memory)\n  SERVIS_PAGE_SIZE    Table page size\n  SERVIS_UTC_OFFSET   Display offset in minutes east of UTC\n  RUST_LOG            Log filter (default: warn)"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and keep the session token.
    Login {
        #[arg(long, short)]
        user: String,
        #[arg(long, env = "SERVIS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Drop the session token.
    Logout,
    /// Create a user account.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        surname: String,
        #[arg(long)]
        user_name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "SERVIS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Show the API base and whether a session is active.
    Whoami,
    Customers {
        #[command(subcommand)]
        command: CustomersCommand,
    },
    Devices {
        #[command(subcommand)]
        command: DevicesCommand,
    },
}

#[derive(Subcommand)]
enum CustomersCommand {
    List {
        /// `column=needle`, case-insensitive substring match.
        #[arg(long)]
        filter: Option<String>,
        /// Column path or title.
        #[arg(long)]
        sort: Option<String>,
        #[arg(long, default_value_t = false)]
        desc: bool,
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Print the raw records instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    Create(CustomerArgs),
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
    Edit {
        id: String,
    },
}

#[derive(Subcommand)]
enum DevicesCommand {
    Create(DeviceArgs),
}

#[derive(Args)]
struct CustomerArgs {
    /// Send this JSON file (or `-` for stdin) as-is.
    #[arg(long)]
    json_file: Option<PathBuf>,
    /// Start from the example customer.
    #[arg(long, default_value_t = false)]
    example: bool,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    surname: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    address_line: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    neighborhood: Option<String>,
    #[arg(long)]
    district: Option<String>,
    #[arg(long)]
    zip_code: Option<String>,
    #[arg(long)]
    country: Option<String>,
    #[arg(long, value_enum)]
    customer_type: Option<CustomerType>,
    #[arg(long, default_value_t = false)]
    deleted: bool,
    #[arg(long)]
    created_by: Option<String>,
    #[arg(long)]
    updated_by: Option<String>,
    #[arg(long)]
    created_time: Option<String>,
    #[arg(long)]
    updated_time: Option<String>,
    #[arg(long)]
    created_at: Option<String>,
    #[arg(long)]
    updated_at: Option<String>,
}

impl CustomerArgs {
    fn apply(&self, form: &mut CustomerForm) {
        let fields = [
            (&self.name, &mut form.name),
            (&self.surname, &mut form.surname),
            (&self.phone, &mut form.phone_number),
            (&self.email, &mut form.email),
            (&self.address_line, &mut form.address.address_line),
            (&self.city, &mut form.address.city),
            (&self.neighborhood, &mut form.address.neighborhood),
            (&self.district, &mut form.address.district),
            (&self.zip_code, &mut form.address.zip_code),
            (&self.country, &mut form.address.country),
            (&self.created_by, &mut form.created_by),
            (&self.updated_by, &mut form.updated_by),
            (&self.created_time, &mut form.created_time),
            (&self.updated_time, &mut form.updated_time),
            (&self.created_at, &mut form.created_at),
            (&self.updated_at, &mut form.updated_at),
        ];
        for (arg, field) in fields {
            if let Some(value) = arg {
                field.clone_from(value);
            }
        }
        if let Some(kind) = self.customer_type {
            form.customer_type = kind;
        }
        form.is_deleted |= self.deleted;
    }
}

#[derive(Args)]
struct DeviceArgs {
    /// Send this JSON file (or `-` for stdin) as-is.
    #[arg(long)]
    json_file: Option<PathBuf>,
    /// Start from the example device.
    #[arg(long, default_value_t = false)]
    example: bool,
    #[arg(long)]
    brand: Option<String>,
    #[arg(long)]
    model: Option<String>,
    #[arg(long)]
    serial_number: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    customer_id: Option<String>,
    #[arg(long, value_enum)]
    product_type: Option<ProductType>,
    #[arg(long)]
    created_by: Option<String>,
    #[arg(long)]
    updated_by: Option<String>,
    #[arg(long)]
    created_time: Option<String>,
    #[arg(long)]
    updated_time: Option<String>,
    #[arg(long)]
    created_at: Option<String>,
    #[arg(long)]
    updated_at: Option<String>,
    #[arg(long, default_value_t = false)]
    deleted: bool,
}

impl DeviceArgs {
    fn apply(&self, form: &mut DeviceForm) {
        let fields = [
            (&self.brand, &mut form.brand),
            (&self.model, &mut form.model),
            (&self.serial_number, &mut form.serial_number),
            (&self.description, &mut form.description),
            (&self.customer_id, &mut form.customer_id),
            (&self.created_by, &mut form.created_by),
            (&self.updated_by, &mut form.updated_by),
            (&self.created_time, &mut form.created_time),
            (&self.updated_time, &mut form.updated_time),
            (&self.created_at, &mut form.created_at),
            (&self.updated_at, &mut form.updated_at),
        ];
        for (arg, field) in fields {
            if let Some(value) = arg {
                field.clone_from(value);
            }
        }
        if self.product_type.is_some() {
            form.product_type = self.product_type;
        }
        form.is_deleted |= self.deleted;
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(ConsoleError::ActionFailed) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{}", Notification::error(err.to_string()));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), ConsoleError> {
    let config = ConsoleConfig::load()?;
    let client = ServisClient::from_config(&config.client)?;
    let clock = FormClock::system(config.display.utc_offset_minutes);
    tracing::debug!(api_base = %config.client.api_base, "config loaded");

    match cli.command {
        Commands::Login { user, password } => {
            let mut page = LoginPage::new(&client);
            if let Navigation::Redirect(_) = page.mount() {
                eprintln!("{}", Notification::info("Zaten oturum açık"));
                return Ok(());
            }
            let next = page.submit(&LoginForm {
                email_or_user_name: user,
                password,
            });
            finish(page.take_notifications(), next.is_some())
        }
        Commands::Logout => {
            let mut page = LoginPage::new(&client);
            page.logout();
            let notes = page.take_notifications();
            let ok = !notes.iter().any(Notification::is_error);
            finish(notes, ok)
        }
        Commands::Register {
            name,
            surname,
            user_name,
            email,
            password,
        } => {
            let mut page = RegisterPage::new(&client);
            let next = page.submit(&RegisterForm {
                name,
                surname,
                user_name,
                email,
                password,
            });
            finish(page.take_notifications(), next.is_some())
        }
        Commands::Whoami => {
            match client.session().token() {
                Some(token) => {
                    let prefix: String = token.chars().take(8).collect();
                    println!("Oturum açık · {} · {prefix}…", client.base());
                }
                None => println!("Oturum yok · {}", client.base()),
            }
            Ok(())
        }
        Commands::Customers { command } => {
            require(Route::Customers, &client)?;
            customers(command, &client, &config.display, &clock)
        }
        Commands::Devices {
            command: DevicesCommand::Create(args),
        } => {
            require(Route::Devices, &client)?;
            let mut page = DevicesPage::new(&client);
            page.open_create(&clock);
            if let Some(dialog) = page.dialog_mut() {
                if !args.example {
                    dialog.form = DeviceForm::default();
                }
                match &args.json_file {
                    Some(path) => {
                        dialog.mode = CreateMode::Json;
                        dialog.raw_json = read_input(path)?;
                    }
                    None => args.apply(&mut dialog.form),
                }
            }
            let ok = page.submit_create(&clock);
            if let Some(record) = page.last_created() {
                println!("{}", serde_json::to_string_pretty(record)?);
            }
            finish(page.take_notifications(), ok)
        }
    }
}

fn customers<T: Transport>(
    command: CustomersCommand,
    client: &ServisClient<T>,
    display: &DisplayConfig,
    clock: &FormClock,
) -> Result<(), ConsoleError> {
    let mut page = CustomersPage::new(client);
    match command {
        CustomersCommand::List {
            filter,
            sort,
            desc,
            page: page_number,
            json,
        } => {
            let filter = filter.map(|f| parse_filter(&f)).transpose()?;
            let ok = page.load();
            flush(page.take_notifications());
            if !ok {
                return Err(ConsoleError::ActionFailed);
            }
            if json {
                println!("{}", serde_json::to_string_pretty(page.records())?);
                return Ok(());
            }
            let direction = if desc {
                SortDirection::Desc
            } else {
                SortDirection::Asc
            };
            let options = TableOptions {
                page: page_number,
                page_size: display.page_size,
                filter,
                sort: sort.map(|column| (column, direction)),
                render: RenderOptions::with_offset_minutes(display.utc_offset_minutes),
            };
            println!("{}", page.render(&options)?);
            Ok(())
        }
        CustomersCommand::Create(args) => {
            page.open_create();
            if args.example {
                page.fill_example();
            }
            if let Some(dialog) = page.dialog_mut() {
                match &args.json_file {
                    Some(path) => {
                        dialog.mode = CreateMode::Json;
                        dialog.raw_json = read_input(path)?;
                    }
                    None => args.apply(&mut dialog.form),
                }
            }
            let ok = page.submit_create(clock);
            finish(page.take_notifications(), ok)
        }
        CustomersCommand::Delete { id, yes } => {
            page.request_delete(id.as_str());
            if !yes && !confirm(&format!("{id} numaralı müşteri silinsin mi? [e/H] "))? {
                page.cancel_delete();
                eprintln!("{}", Notification::info("Silme iptal edildi"));
                return Ok(());
            }
            let ok = page.confirm_delete();
            finish(page.take_notifications(), ok)
        }
        CustomersCommand::Edit { id } => {
            page.edit(&id);
            flush(page.take_notifications());
            Ok(())
        }
    }
}

fn require<T: Transport>(route: Route, client: &ServisClient<T>) -> Result<(), ConsoleError> {
    match guard(route, client.session()) {
        Navigation::Allow(_) => Ok(()),
        Navigation::Redirect(_) => Err(ConsoleError::Unauthenticated(route)),
    }
}

fn parse_filter(raw: &str) -> Result<(String, String), ConsoleError> {
    match raw.split_once('=') {
        Some((column, needle)) if !column.trim().is_empty() => {
            Ok((column.trim().to_string(), needle.to_string()))
        }
        _ => Err(ConsoleError::Filter(raw.to_string())),
    }
}

fn read_input(path: &Path) -> Result<String, ConsoleError> {
    let wrap = |source| ConsoleError::Read {
        path: path.display().to_string(),
        source,
    };
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map_err(wrap)?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).map_err(wrap)
}

fn confirm(prompt: &str) -> Result<bool, ConsoleError> {
    let wrap = |source| ConsoleError::Read {
        path: "stdin".into(),
        source,
    };
    let mut stderr = std::io::stderr();
    write!(stderr, "{prompt}").map_err(wrap)?;
    stderr.flush().map_err(wrap)?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer).map_err(wrap)?;
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "e" | "evet" | "y" | "yes"
    ))
}

fn flush(notifications: Vec<Notification>) {
    for notification in notifications {
        eprintln!("{notification}");
    }
}

fn finish(notifications: Vec<Notification>, ok: bool) -> Result<(), ConsoleError> {
    flush(notifications);
    if ok { Ok(()) } else { Err(ConsoleError::ActionFailed) }
}
