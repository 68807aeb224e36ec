use crate::catalog::{categories, Category, CategoryFilter};
use crate::errors::AppError;
use crate::models::{
    CategoryInfo, Configuration, Entry, FilterQuery, LogEntryForm, NewEntryRequest, ReportQuery,
    ReportRow,
};
use crate::report::{aggregate, filter_entries, parse_filter, sort_by_date_desc, Granularity};
use crate::state::AppState;
use crate::ui::{self, Notice};
use axum::{
    extract::{rejection::FormRejection, Query, State},
    http::StatusCode,
    response::Html,
    Form, Json,
};
use chrono::{Local, NaiveDate};
use tracing::{info, warn};

// Pages never fail outright: storage problems become a warning banner and the
// page renders from defaults.

async fn page_config(state: &AppState, notices: &mut Vec<Notice>) -> Configuration {
    match state.config.load().await {
        Ok(config) => config,
        Err(err) => {
            warn!("falling back to default configuration: {err}");
            notices.push(Notice::warning(format!(
                "Error loading configuration ({err}). Using fallback configuration."
            )));
            Configuration::default()
        }
    }
}

async fn page_entries(state: &AppState, notices: &mut Vec<Notice>) -> Vec<Entry> {
    match state.entries.load_all().await {
        Ok(entries) => entries,
        Err(err) => {
            warn!("could not load entries: {err}");
            notices.push(Notice::warning(format!(
                "Error loading tracking data ({err}). Showing no entries."
            )));
            Vec::new()
        }
    }
}

fn page_filter(raw: Option<&str>, notices: &mut Vec<Notice>) -> CategoryFilter {
    parse_filter(raw).unwrap_or_else(|err| {
        notices.push(Notice::error(format!("{err}. Showing all categories.")));
        CategoryFilter::All
    })
}

pub async fn dashboard(State(state): State<AppState>) -> Html<String> {
    let mut notices = Vec::new();
    let entries = page_entries(&state, &mut notices).await;
    Html(ui::render_dashboard(&sort_by_date_desc(&entries), notices))
}

pub async fn log_form(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Html<String> {
    let mut notices = Vec::new();
    let selected = match query.category.as_deref() {
        None | Some("") => categories()[0],
        Some(raw) => raw.parse::<Category>().unwrap_or_else(|err| {
            notices.push(Notice::error(err.to_string()));
            categories()[0]
        }),
    };
    let config = page_config(&state, &mut notices).await;
    Html(ui::render_log_form(selected, &config, today(), &notices))
}

pub async fn log_submit(
    State(state): State<AppState>,
    form: Result<Form<LogEntryForm>, FormRejection>,
) -> Html<String> {
    let mut notices = Vec::new();
    let selected = match form {
        Ok(Form(form)) => submit_entry(&state, form, &mut notices).await,
        Err(rejection) => {
            warn!("rejected log form: {rejection}");
            notices.push(Notice::error(format!(
                "Entry was not saved: {}",
                rejection.body_text()
            )));
            categories()[0]
        }
    };
    let config = page_config(&state, &mut notices).await;
    Html(ui::render_log_form(selected, &config, today(), &notices))
}

async fn submit_entry(state: &AppState, form: LogEntryForm, notices: &mut Vec<Notice>) -> Category {
    let category = match form.category.parse::<Category>() {
        Ok(category) => category,
        Err(err) => {
            notices.push(Notice::error(format!("Entry was not saved: {err}")));
            return categories()[0];
        }
    };

    let date = form.date;
    let entry = Entry::new(date, category, form.metric, form.reflection);
    match state.entries.append(entry).await {
        Ok(()) => {
            info!("logged entry for {category} on {date}");
            notices.push(Notice::success("Entry logged successfully!"));
        }
        Err(err) => {
            warn!("failed to log entry: {err}");
            notices.push(Notice::error(format!("Entry was not saved: {err}")));
        }
    }
    category
}

pub async fn view_entries(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Html<String> {
    let mut notices = Vec::new();
    let filter = page_filter(query.category.as_deref(), &mut notices);
    let entries = page_entries(&state, &mut notices).await;
    let filtered = filter_entries(&entries, filter);
    Html(ui::render_entries(&filtered, filter, !entries.is_empty(), notices))
}

pub async fn reports(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Html<String> {
    let mut notices = Vec::new();
    let granularity = match query.granularity.as_deref() {
        None | Some("") => Granularity::default(),
        Some(raw) => raw.parse::<Granularity>().unwrap_or_else(|err| {
            notices.push(Notice::error(err));
            Granularity::default()
        }),
    };
    let filter = page_filter(query.category.as_deref(), &mut notices);
    let entries = page_entries(&state, &mut notices).await;
    let rows = aggregate(&entries, granularity, filter);
    Html(ui::render_reports(&rows, granularity, filter, !entries.is_empty(), notices))
}

pub async fn settings(State(state): State<AppState>) -> Html<String> {
    let mut notices = Vec::new();
    let config = page_config(&state, &mut notices).await;
    Html(ui::render_settings(&config, notices))
}

pub async fn get_categories() -> Json<Vec<CategoryInfo>> {
    Json(
        categories()
            .iter()
            .map(|category| CategoryInfo {
                name: *category,
                verse: category.verse(),
            })
            .collect(),
    )
}

pub async fn get_config(State(state): State<AppState>) -> Result<Json<Configuration>, AppError> {
    Ok(Json(state.config.load().await?))
}

pub async fn put_config(
    State(state): State<AppState>,
    Json(config): Json<Configuration>,
) -> Result<Json<Configuration>, AppError> {
    state.config.save(&config).await?;
    info!("configuration replaced");
    Ok(Json(config))
}

pub async fn get_entries(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<Vec<Entry>>, AppError> {
    let filter = parse_filter(query.category.as_deref())?;
    let entries = state.entries.load_all().await?;
    Ok(Json(filter_entries(&entries, filter)))
}

pub async fn create_entry(
    State(state): State<AppState>,
    Json(payload): Json<NewEntryRequest>,
) -> Result<(StatusCode, Json<Entry>), AppError> {
    let category: Category = payload.category.trim().parse()?;
    let entry = Entry::new(
        payload.date.unwrap_or_else(today),
        category,
        payload.metric,
        payload.reflection,
    );

    state.entries.append(entry.clone()).await?;
    info!("logged entry for {category} on {}", entry.date);
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn get_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Vec<ReportRow>>, AppError> {
    let granularity = match query.granularity.as_deref() {
        None | Some("") => Granularity::default(),
        Some(raw) => raw.parse::<Granularity>().map_err(AppError::bad_request)?,
    };
    let filter = parse_filter(query.category.as_deref())?;
    let entries = state.entries.load_all().await?;
    Ok(Json(aggregate(&entries, granularity, filter)))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
