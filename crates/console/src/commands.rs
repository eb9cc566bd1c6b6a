// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Subcommands and their execution.

use crate::error::ConsoleError;
use crate::http::expect_result;
use crate::render;
use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;
use std::str::FromStr;
use std::sync::Arc;
use tenderboard::TenderHub;
use tenderboard_api::wire::parse_wire_date;
use tenderboard_api::workflows;
use tenderboard_api::{
    AdminGateway, AuthGateway, ContractorGateway, DEFAULT_PAGE_SIZE, DEFAULT_SORT_FIELD, ListParams,
    ListState, ListView, PageRequest, ReportState, ReportView, Role, SortDirection, UserSession,
};
use tenderboard_domain::{Offer, TenderDraft, TenderOffer};
use time::OffsetDateTime;
use tracing::debug;

/// Page size used when a command has to find one record by id.
const LOOKUP_PAGE_SIZE: u32 = 200;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Log in and print the session token and roles
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "TENDERBOARD_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the session and print the commands that clear it
    Logout,
    /// Show the total, open and expired tender counts
    Counts,
    /// Manage tenders (admin)
    #[command(subcommand)]
    Tenders(TenderCommand),
    /// Show the offers report of a tender (admin)
    Report {
        /// Tender to report on; defaults to the newest tender
        #[arg(long)]
        tender_id: Option<i64>,
    },
    /// List tenders open for offers (contractor)
    OpenTenders(ListArgs),
    /// Manage your offers (contractor)
    #[command(subcommand)]
    Offers(OfferCommand),
}

impl Command {
    /// Name for log lines; never carries arguments such as the password.
    const fn name(&self) -> &'static str {
        match self {
            Self::Login { .. } => "login",
            Self::Logout => "logout",
            Self::Counts => "counts",
            Self::Tenders(_) => "tenders",
            Self::Report { .. } => "report",
            Self::OpenTenders(_) => "open-tenders",
            Self::Offers(_) => "offers",
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum TenderCommand {
    /// List tenders
    List(ListArgs),
    /// Show one tender
    Show { id: i64 },
    /// Create a tender
    Create(TenderFields),
    /// Change fields of an existing tender
    Update {
        id: i64,
        #[command(flatten)]
        fields: TenderFields,
    },
    /// Delete a tender
    Delete { id: i64 },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum OfferCommand {
    /// List your offers
    List(ListArgs),
    /// Place an offer on an open tender
    Submit {
        #[arg(long)]
        tender_id: i64,
        #[arg(long, value_parser = parse_price)]
        price: Decimal,
    },
    /// Change the price of one of your offers
    Update {
        id: i64,
        #[arg(long, value_parser = parse_price)]
        price: Decimal,
    },
    /// Withdraw one of your offers
    Withdraw { id: i64 },
}

/// Paging and sorting flags shared by list commands.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ListArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,
    #[arg(long, default_value = DEFAULT_SORT_FIELD)]
    pub sort_field: String,
    /// Sort ascending instead of descending
    #[arg(long)]
    pub ascending: bool,
    /// Include tenders whose end date has passed
    #[arg(long)]
    pub include_expired: bool,
}

impl ListArgs {
    fn params(&self) -> ListParams {
        ListParams {
            page_number: self.page.max(1),
            page_size: self.page_size.max(1),
            sort_field: self.sort_field.clone(),
            sort_direction: if self.ascending {
                SortDirection::Ascending
            } else {
                SortDirection::Descending
            },
            include_expired: self.include_expired.then_some(true),
        }
    }
}

impl Default for ListArgs {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            sort_field: DEFAULT_SORT_FIELD.to_string(),
            ascending: false,
            include_expired: false,
        }
    }
}

/// Tender fields as entered on the command line; unset ones stay as they are.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct TenderFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Start of the validity window (YYYY-MM-DD or RFC 3339)
    #[arg(long, value_parser = parse_date)]
    pub begin: Option<OffsetDateTime>,
    /// End of the validity window (YYYY-MM-DD or RFC 3339)
    #[arg(long, value_parser = parse_date)]
    pub end: Option<OffsetDateTime>,
    #[arg(long, value_parser = parse_price)]
    pub from_price: Option<Decimal>,
    #[arg(long, value_parser = parse_price)]
    pub to_price: Option<Decimal>,
}

impl TenderFields {
    fn apply_to(self, draft: TenderDraft) -> TenderDraft {
        TenderDraft {
            id: draft.id,
            title: self.title.unwrap_or(draft.title),
            description: self.description.unwrap_or(draft.description),
            begin_date: self.begin.or(draft.begin_date),
            end_date: self.end.or(draft.end_date),
            from_price: self.from_price.or(draft.from_price),
            to_price: self.to_price.or(draft.to_price),
        }
    }
}

/// Parses a command-line date.
///
/// # Errors
///
/// Returns [`ConsoleError::InvalidDate`] for anything but a date or an
/// RFC 3339 timestamp.
pub fn parse_date(raw: &str) -> Result<OffsetDateTime, ConsoleError> {
    parse_wire_date(raw).ok_or_else(|| ConsoleError::InvalidDate {
        value: raw.to_string(),
    })
}

/// Parses a command-line price.
///
/// # Errors
///
/// Returns [`ConsoleError::InvalidPrice`] if `raw` is not a decimal number.
pub fn parse_price(raw: &str) -> Result<Decimal, ConsoleError> {
    Decimal::from_str(raw.trim()).map_err(|_| ConsoleError::InvalidPrice {
        value: raw.to_string(),
    })
}

/// Parses a role name given on the command line.
///
/// # Errors
///
/// Returns a message naming the accepted roles.
pub fn parse_role(raw: &str) -> Result<Role, String> {
    Role::parse(raw)
        .ok_or_else(|| format!("unknown role '{raw}', use Admin or Contractor"))
}

/// Runs commands against one gateway on behalf of one session.
pub struct Console<G> {
    gateway: G,
    hub: Arc<TenderHub>,
    session: UserSession,
    json: bool,
}

impl<G> Console<G>
where
    G: AdminGateway + ContractorGateway + AuthGateway,
{
    pub fn new(gateway: G, hub: Arc<TenderHub>, session: UserSession, json: bool) -> Self {
        gateway.use_session(&session);
        Self {
            gateway,
            hub,
            session,
            json,
        }
    }

    pub const fn session(&self) -> &UserSession {
        &self.session
    }

    /// Runs `command` and returns what to print.
    ///
    /// # Errors
    ///
    /// Returns an error if the session lacks the command's role, the input
    /// is invalid, or the service fails or refuses.
    pub async fn run(&mut self, command: Command) -> Result<String, ConsoleError> {
        debug!(command = command.name(), "Running command");
        match command {
            Command::Login { username, password } => self.login(&username, &password).await,
            Command::Logout => Ok(self.logout()),
            Command::Counts => self.counts().await,
            Command::Tenders(command) => self.tenders(command).await,
            Command::Report { tender_id } => self.report(tender_id).await,
            Command::OpenTenders(args) => {
                self.session.require(Role::Contractor, "list open tenders")?;
                let gateway: &G = &self.gateway;
                let mut view: ListView<TenderOffer> = ListView::new(args.params());
                view.load(|req| async move { gateway.list_open_tenders(&req).await })
                    .await;
                self.render_list(&view, render::tender_line)
            }
            Command::Offers(command) => self.offers(command).await,
        }
    }

    async fn login(&mut self, username: &str, password: &str) -> Result<String, ConsoleError> {
        let session: UserSession =
            workflows::login(&self.gateway, &self.hub, username, password).await?;
        self.session = session;

        let roles: Vec<String> = self.session.roles.iter().map(Role::to_string).collect();
        if self.json {
            return Ok(serde_json::to_string_pretty(&json!({
                "Token": self.session.token,
                "Username": self.session.username,
                "Roles": roles,
            }))?);
        }
        Ok(format!(
            "Logged in as {} ({})\nexport TENDERBOARD_TOKEN={}\nexport TENDERBOARD_ROLES={}",
            self.session.username,
            roles.join(", "),
            self.session.token,
            roles.join(",")
        ))
    }

    fn logout(&mut self) -> String {
        workflows::logout(&mut self.session, &self.hub);
        self.gateway.use_session(&self.session);
        String::from("Logged out\nunset TENDERBOARD_TOKEN TENDERBOARD_ROLES")
    }

    async fn counts(&self) -> Result<String, ConsoleError> {
        self.session.require(Role::Admin, "read tender counts")?;
        let counts = expect_result(self.gateway.tender_counts().await?)?;
        self.hub.update_counts(counts);

        let stored = self.hub.counts().get();
        if self.json {
            return Ok(serde_json::to_string_pretty(&stored)?);
        }
        Ok(render::counts(&stored))
    }

    async fn tenders(&self, command: TenderCommand) -> Result<String, ConsoleError> {
        self.session.require(Role::Admin, "manage tenders")?;
        match command {
            TenderCommand::List(args) => {
                let gateway: &G = &self.gateway;
                let mut view: ListView<TenderOffer> = ListView::new(args.params());
                view.load(|req| async move { gateway.list_tenders(&req).await })
                    .await;
                self.render_list(&view, render::tender_line)
            }
            TenderCommand::Show { id } => {
                let tender: TenderOffer = expect_result(self.gateway.get_tender(id).await?)?;
                self.render(&tender, render::tender_detail)
            }
            TenderCommand::Create(fields) => {
                let draft: TenderDraft = fields.apply_to(TenderDraft::default());
                let response = workflows::save_tender(&self.gateway, &self.hub, draft).await?;
                let message: String = response.message.clone();
                match response.result {
                    Some(tender) => Ok(format!("Created tender #{}: {}", tender.id, tender.title)),
                    None => Ok(non_empty_or(message, "Tender created")),
                }
            }
            TenderCommand::Update { id, fields } => {
                let existing: TenderOffer = expect_result(self.gateway.get_tender(id).await?)?;
                let draft: TenderDraft = fields.apply_to(TenderDraft::from_tender(&existing));
                let response = workflows::save_tender(&self.gateway, &self.hub, draft).await?;
                let done: String = format!("Updated tender #{id}");
                Ok(non_empty_or(response.message, &done))
            }
            TenderCommand::Delete { id } => {
                let response = workflows::delete_tender(&self.gateway, &self.hub, id).await?;
                let done: String = format!("Deleted tender #{id}");
                Ok(non_empty_or(response.message, &done))
            }
        }
    }

    async fn report(&self, tender_id: Option<i64>) -> Result<String, ConsoleError> {
        self.session.require(Role::Admin, "read tender report")?;
        let mut view: ReportView = ReportView::new();
        if let Some(id) = tender_id {
            view.request_tender(id);
        }

        if view.load(&self.gateway).await.is_none() {
            return Err(ConsoleError::Failed(String::from("No tender to report on")));
        }
        if let Some(id) = tender_id
            && view.selected_tender_id() != Some(id)
        {
            return Err(ConsoleError::Failed(format!("Tender #{id} not found")));
        }

        match view.state() {
            ReportState::Loaded(report) => {
                if self.json {
                    return Ok(serde_json::to_string_pretty(report)?);
                }
                let tender: Option<&TenderOffer> = view
                    .tenders()
                    .iter()
                    .find(|t| Some(t.id) == view.selected_tender_id());
                Ok(render::report(tender, report))
            }
            ReportState::Failed { message } => Err(ConsoleError::Failed(message.clone())),
            ReportState::Idle | ReportState::Loading => {
                Err(ConsoleError::Failed(String::from("Report not loaded")))
            }
        }
    }

    async fn offers(&self, command: OfferCommand) -> Result<String, ConsoleError> {
        self.session.require(Role::Contractor, "manage offers")?;
        match command {
            OfferCommand::List(args) => {
                let gateway: &G = &self.gateway;
                let mut view: ListView<Offer> = ListView::new(args.params());
                view.load(|req| async move { gateway.list_my_offers(&req).await })
                    .await;
                self.render_list(&view, render::offer_line)
            }
            OfferCommand::Submit { tender_id, price } => {
                let request: PageRequest = PageRequest::new(1, LOOKUP_PAGE_SIZE);
                let open = expect_result(self.gateway.list_open_tenders(&request).await?)?;
                let tender: TenderOffer = open
                    .records
                    .into_iter()
                    .find(|t| t.id == tender_id)
                    .ok_or_else(|| {
                        ConsoleError::Failed(format!("Tender #{tender_id} is not open for offers"))
                    })?;

                let response = workflows::submit_offer(&self.gateway, &tender, Some(price)).await?;
                Ok(non_empty_or(
                    response.message,
                    &format!("Offer of {price} placed on tender #{tender_id}"),
                ))
            }
            OfferCommand::Update { id, price } => {
                let request: PageRequest = PageRequest::new(1, LOOKUP_PAGE_SIZE);
                let mine = expect_result(self.gateway.list_my_offers(&request).await?)?;
                let offer: Offer = mine
                    .records
                    .into_iter()
                    .find(|o| o.id == id)
                    .ok_or_else(|| ConsoleError::Failed(format!("Offer #{id} not found")))?;

                let response = workflows::update_offer(&self.gateway, &offer, Some(price)).await?;
                let done: String = format!("Offer #{id} updated");
                Ok(non_empty_or(response.message, &done))
            }
            OfferCommand::Withdraw { id } => {
                let response = workflows::withdraw_offer(&self.gateway, id).await?;
                let done: String = format!("Offer #{id} withdrawn");
                Ok(non_empty_or(response.message, &done))
            }
        }
    }

    fn render<T: Serialize>(
        &self,
        value: &T,
        text: impl Fn(&T) -> String,
    ) -> Result<String, ConsoleError> {
        if self.json {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(text(value))
        }
    }

    fn render_list<T: Clone + Serialize>(
        &self,
        view: &ListView<T>,
        line: impl Fn(&T) -> String,
    ) -> Result<String, ConsoleError> {
        match view.state() {
            ListState::Loaded { records, total } => {
                if self.json {
                    return Ok(serde_json::to_string_pretty(&json!({
                        "RecordsCount": total,
                        "Records": records,
                    }))?);
                }
                let params: &ListParams = view.params();
                Ok(render::list(
                    records,
                    *total,
                    params.page_number,
                    params.page_size,
                    line,
                ))
            }
            ListState::Failed { message } => Err(ConsoleError::Failed(message.clone())),
            ListState::Idle | ListState::Loading { .. } => {
                Err(ConsoleError::Failed(String::from("List not loaded")))
            }
        }
    }
}

fn non_empty_or(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
