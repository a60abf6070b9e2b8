use std::future::Future;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use elimu_api::{ApiClient, ApiError, AuthStore, FileAuthStore, MemoryAuthStore};
use elimu_cli::filter::ResourceFilter;
use elimu_cli::output::{resolution_line, resources_table, routes_table, settings_table};
use elimu_cli::settings::{self, Settings};
use elimu_model::{LoginRequest, ModelError, PaymentRequest, PhoneNumber, RegisterRequest};
use elimu_nav::{
    LoadOutcome, MemoryHistory, MemoryViewport, NavigationController, Resolution, ViewContext,
    resolve_location,
};
use elimu_router::app_routes;
use tracing::{info, warn};

use crate::cli::{
    BrowseArgs, ConfigAction, ConfigArgs, LoginArgs, PageFormatArg, PaidArgs, PayArgs,
    RegisterArgs, ResolveArgs, ResourcesArgs,
};

/// Settings plus a client whose session lives next to them.
pub struct Session {
    settings: Settings,
    client: ApiClient,
}

impl Session {
    pub fn open(settings: Settings) -> Result<Self> {
        let auth: Arc<dyn AuthStore> = match settings::session_path() {
            Some(path) => Arc::new(FileAuthStore::new(path)),
            None => {
                warn!("Could not determine session path, login will not persist");
                Arc::new(MemoryAuthStore::new())
            }
        };
        let client = ApiClient::new(settings.api_config(), auth).map_err(api_error)?;
        Ok(Self { settings, client })
    }
}

/// Attach the user-facing message so `error: ...` reads like the storefront.
fn api_error(err: ApiError) -> anyhow::Error {
    let message = err.user_message().to_string();
    anyhow::Error::new(err).context(message)
}

fn model_error(err: ModelError) -> anyhow::Error {
    let message = err.user_message().to_string();
    anyhow::Error::new(err).context(message)
}

fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    Ok(runtime.block_on(future))
}

fn read_password(given: Option<String>) -> Result<String> {
    if let Some(password) = given {
        return Ok(password);
    }
    eprint!("Password: ");
    io::stderr().flush().ok();
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub fn run_routes() -> Result<()> {
    let routes = app_routes().context("build route table")?;
    println!("{}", routes_table(&routes));
    Ok(())
}

/// Returns whether every path matched a route.
pub fn run_resolve(args: &ResolveArgs, settings: &Settings) -> Result<bool> {
    let routes = app_routes().context("build route table")?;
    let mut all_matched = true;
    for input in &args.paths {
        let line = resolution_line(&routes, input, &settings.origin);
        all_matched &= line.matched;
        println!("{line}");
    }
    Ok(all_matched)
}

pub fn run_browse(args: &BrowseArgs, session: &Session) -> Result<Resolution> {
    let routes = app_routes().context("build route table")?;
    let context = ViewContext::new(
        Arc::new(session.client.clone()),
        Arc::clone(session.client.auth()),
    );
    let location = resolve_location(&args.path, &session.settings.origin);
    let mut nav = NavigationController::new(
        routes,
        context,
        MemoryHistory::new(location),
        MemoryViewport::new(),
    )
    .with_origin(&session.settings.origin);

    let resolution = nav.start();
    info!("Resolved {} to {:?}", nav.state().current_path, resolution);

    if !args.no_data
        && let Some(outcome) = block_on(nav.settle())?
        && outcome == LoadOutcome::Failed
    {
        warn!("Page data failed to load; showing the error banner");
    }

    let output = match args.format {
        PageFormatArg::Html => nav.mount().html(),
        PageFormatArg::Text => nav
            .mount()
            .content()
            .map(|node| node.text_content())
            .unwrap_or_default(),
    };
    println!("{output}");
    Ok(resolution)
}

pub fn run_resources(args: &ResourcesArgs, session: &Session) -> Result<()> {
    let filter = ResourceFilter::parse(
        args.section.as_deref(),
        args.level.as_deref(),
        args.free,
        args.search.as_deref(),
    )?;
    let resources = block_on(session.client.fetch_resources())?.map_err(api_error)?;
    let selected = filter.apply(&resources);
    info!("Selected {} of {} resources", selected.len(), resources.len());

    if args.json {
        let json = serde_json::to_string_pretty(&selected).context("serialize resources")?;
        println!("{json}");
    } else if selected.is_empty() {
        println!("No resources found yet.");
    } else {
        println!("{}", resources_table(&selected));
        println!("{} resource(s)", selected.len());
    }
    Ok(())
}

pub fn run_register(args: RegisterArgs, session: &Session) -> Result<()> {
    let password = read_password(args.password)?;
    let request = RegisterRequest::new(args.email, password, args.name).map_err(model_error)?;
    let message = block_on(session.client.register(&request))?.map_err(api_error)?;
    println!("{message}");
    Ok(())
}

pub fn run_login(args: LoginArgs, session: &Session) -> Result<()> {
    let password = read_password(args.password)?;
    let request = LoginRequest::new(args.email, password).map_err(model_error)?;
    let auth = if args.legacy {
        block_on(session.client.login_legacy(&request))?
    } else {
        block_on(session.client.login(&request))?
    }
    .map_err(api_error)?;
    let who = auth
        .user
        .as_ref()
        .map_or(request.email.as_str(), |user| user.display_name());
    println!("Signed in as {who}.");
    Ok(())
}

pub fn run_logout(session: &Session) -> Result<()> {
    session.client.logout().map_err(api_error)?;
    println!("Signed out.");
    Ok(())
}

pub fn run_whoami(session: &Session) -> Result<()> {
    if !session.client.is_logged_in() {
        bail!("Not signed in. Run `elimu login` first.");
    }
    let profile = block_on(session.client.me())?.map_err(api_error)?;
    println!("{}", profile.display_name());
    if let Some(email) = &profile.email {
        println!("  email: {email}");
    }
    if let Some(id) = profile.id {
        println!("  id:    {id}");
    }
    Ok(())
}

pub fn run_paid(args: &PaidArgs, session: &Session) -> Result<()> {
    let is_paid = block_on(session.client.is_paid_for(args.resource_id))?.map_err(api_error)?;
    if is_paid {
        println!("Resource {} is unlocked.", args.resource_id);
    } else {
        println!("Resource {} is locked.", args.resource_id);
    }
    Ok(())
}

pub fn run_pay(args: &PayArgs, session: &Session) -> Result<()> {
    let phone = PhoneNumber::parse(&args.phone).map_err(model_error)?;
    let request = PaymentRequest {
        resource_id: args.resource_id,
        phone,
    };
    let receipt = block_on(session.client.initiate_payment(&request))?.map_err(api_error)?;
    println!(
        "{}",
        receipt.message.as_deref().unwrap_or("STK Push initiated")
    );
    println!("Check {} to complete the payment.", request.phone);
    Ok(())
}

pub fn run_config(args: ConfigArgs, mut current: Settings) -> Result<()> {
    match args.action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => println!("{}", settings_table(&current)),
        ConfigAction::Set { key, value } => {
            current.set(key, &value)?;
            let path = settings::save_settings(&current)?;
            println!("Saved {key} to {}", path.display());
        }
        ConfigAction::Reset => {
            let path = settings::save_settings(&Settings::default())?;
            println!("Restored defaults in {}", path.display());
        }
        ConfigAction::Path => {
            let settings_path = settings::settings_path().context("no config directory")?;
            let session_path = settings::session_path().context("no config directory")?;
            println!("settings: {}", settings_path.display());
            println!("session:  {}", session_path.display());
        }
    }
    Ok(())
}
