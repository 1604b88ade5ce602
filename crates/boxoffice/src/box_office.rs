//! The BoxOffice: inventory, cart and checkout.
//!
//! The box office owns the in-memory event list, the current cart and the
//! next order number. It mirrors every write it makes to the store, and the
//! store stays the source of truth across restarts.

use std::path::Path;

use chrono::{Local, NaiveDateTime, Weekday};
use tracing::{debug, info, warn};

use boxoffice_core::{
    check_booking_day, parse_seed, require_non_empty, summarize, validate_payment_code, Cart,
    Event, EventDraft, EventId, Order, OrderNumber, ShowSummary, Shortfall, User, UserRecord,
    ValidationError,
};
use boxoffice_store::{SeatUpdate, Store};

use crate::config::BoxOfficeConfig;
use crate::error::{BoxOfficeError, Result};
use crate::export::write_orders;
use crate::session::Session;

/// The main BoxOffice struct.
///
/// Provides a unified API for:
/// - Browsing events
/// - Editing the cart
/// - Checking out
/// - Reading and exporting order history
/// - Managing events (admin)
/// - Signing users in and up
pub struct BoxOffice<S: Store> {
    /// The persistence gateway.
    store: S,
    /// Configuration.
    config: BoxOfficeConfig,
    /// All events, disabled ones included, in store order.
    events: Vec<Event>,
    cart: Cart,
    next_order_number: OrderNumber,
    session: Option<Session>,
}

impl<S: Store> BoxOffice<S> {
    /// Create a box office that has not loaded anything yet.
    ///
    /// Call [`BoxOffice::setup`] before use, or use [`BoxOffice::open`].
    pub fn new(store: S, config: BoxOfficeConfig) -> Self {
        Self {
            store,
            config,
            events: Vec::new(),
            cart: Cart::new(),
            next_order_number: OrderNumber::FIRST,
            session: None,
        }
    }

    /// Create and set up in one step.
    pub fn open(store: S, config: BoxOfficeConfig) -> Result<Self> {
        let mut office = Self::new(store, config);
        office.setup()?;
        Ok(office)
    }

    /// Load events and work out the next order number.
    ///
    /// Imports the configured seed file first if the store has no events.
    /// Any failure here is fatal to startup.
    pub fn setup(&mut self) -> Result<()> {
        if let Some(seed_path) = self.config.seed_path.clone() {
            if self.store.count_events()? == 0 {
                self.import_seed(&seed_path)?;
            }
        }

        self.events = self.store.all_events()?;

        let highest = self.store.all_orders()?.iter().map(|o| o.number).max();
        self.next_order_number = OrderNumber::after(highest);

        info!(
            events = self.events.len(),
            next_order_number = %self.next_order_number,
            "box office ready"
        );
        Ok(())
    }

    fn import_seed(&self, path: &Path) -> Result<()> {
        let text = std::fs::read_to_string(path).map_err(|e| BoxOfficeError::SeedImport {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let drafts = parse_seed(&text).map_err(|e| BoxOfficeError::SeedImport {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let ids = self.store.insert_events(&drafts)?;
        info!(path = %path.display(), imported = ids.len(), "seeded events");
        Ok(())
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &BoxOfficeConfig {
        &self.config
    }

    /// The order number the next checkout will receive.
    pub fn next_order_number(&self) -> OrderNumber {
        self.next_order_number
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Events
    // ─────────────────────────────────────────────────────────────────────────

    /// Enabled events only, or every event for admin views.
    pub fn list_events(&self, include_disabled: bool) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| include_disabled || e.is_enabled())
            .collect()
    }

    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    fn event_index(&self, id: EventId) -> Result<usize> {
        self.events
            .iter()
            .position(|e| e.id == id)
            .ok_or(BoxOfficeError::EventNotFound(id))
    }

    /// All events grouped by title for the admin view.
    pub fn show_summaries(&self) -> Vec<ShowSummary> {
        summarize(&self.events)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Cart
    // ─────────────────────────────────────────────────────────────────────────

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Add seats to the cart, merging with an existing entry.
    ///
    /// Availability is not checked here; see
    /// [`BoxOffice::add_to_cart_checked`].
    pub fn add_to_cart(&mut self, event_id: EventId, qty: u32) -> Result<()> {
        self.event_index(event_id)?;
        self.cart.add(event_id, qty);
        debug!(
            event_id = event_id.get(),
            qty,
            in_cart = self.cart.quantity_of(event_id),
            "added to cart"
        );
        Ok(())
    }

    /// Add seats after checking that the cart's total for this event still
    /// fits within the remaining seats.
    pub fn add_to_cart_checked(&mut self, event_id: EventId, qty: u32) -> Result<()> {
        if qty == 0 {
            return Err(ValidationError::InvalidInput {
                field: "quantity",
                value: qty.to_string(),
            }
            .into());
        }
        let remaining = self.remaining_seats(event_id)?;
        let requested = self.cart.quantity_of(event_id).saturating_add(qty);
        if requested > remaining {
            return Err(insufficient(Shortfall {
                event_id,
                requested,
                remaining,
            }));
        }
        self.add_to_cart(event_id, qty)
    }

    /// Set an entry's quantity; zero removes it. No-op if the event is not
    /// in the cart.
    pub fn update_cart_quantity(&mut self, event_id: EventId, new_qty: u32) {
        if self.cart.update(event_id, new_qty) {
            debug!(event_id = event_id.get(), new_qty, "cart quantity updated");
        }
    }

    /// Like [`BoxOffice::update_cart_quantity`], but refuses quantities above
    /// the remaining seats.
    pub fn update_cart_quantity_checked(&mut self, event_id: EventId, new_qty: u32) -> Result<()> {
        let remaining = self.remaining_seats(event_id)?;
        if new_qty > remaining {
            return Err(insufficient(Shortfall {
                event_id,
                requested: new_qty,
                remaining,
            }));
        }
        self.update_cart_quantity(event_id, new_qty);
        Ok(())
    }

    /// Same as `update_cart_quantity(event_id, 0)`.
    pub fn remove_from_cart(&mut self, event_id: EventId) {
        self.update_cart_quantity(event_id, 0);
    }

    /// True iff every cart entry fits within its event's current in-memory
    /// remaining seats.
    pub fn validate_cart(&self) -> bool {
        self.cart.validate(&self.events)
    }

    /// Sum of price × quantity at current prices.
    pub fn cart_total(&self) -> f64 {
        self.cart.total(&self.events)
    }

    fn remaining_seats(&self, event_id: EventId) -> Result<u32> {
        self.event(event_id)
            .map(|e| e.remaining_seats)
            .ok_or(BoxOfficeError::EventNotFound(event_id))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Checkout
    // ─────────────────────────────────────────────────────────────────────────

    /// Check out the cart now.
    pub fn checkout(&mut self) -> Result<Order> {
        self.checkout_at(Local::now().naive_local())
    }

    /// Check out the cart with an explicit timestamp.
    ///
    /// Seat deductions and the order are persisted as one unit. Only once
    /// the store has accepted them are the in-memory seats, the order
    /// counter and the cart updated, so a failure leaves no trace.
    pub fn checkout_at(&mut self, timestamp: NaiveDateTime) -> Result<Order> {
        if self.cart.is_empty() {
            return Err(BoxOfficeError::EmptyCart);
        }
        if let Some(shortfall) = self.cart.shortfall(&self.events) {
            warn!(
                event_id = shortfall.event_id.get(),
                requested = shortfall.requested,
                remaining = shortfall.remaining,
                "checkout rejected"
            );
            return Err(insufficient(shortfall));
        }

        let lines = self.cart.snapshot(&self.events);
        let seats: Vec<SeatUpdate> = lines
            .iter()
            .map(|line| SeatUpdate {
                event_id: line.event.id,
                remaining_seats: line.event.remaining_seats - line.quantity,
            })
            .collect();
        let order = Order::new(self.next_order_number, timestamp, lines);

        self.store.record_checkout(&seats, &order)?;

        for update in &seats {
            if let Some(event) = self.events.iter_mut().find(|e| e.id == update.event_id) {
                event.remaining_seats = update.remaining_seats;
            }
        }
        self.next_order_number = self.next_order_number.next();
        self.cart.clear();

        info!(
            order_number = %order.number,
            total = order.total,
            items = order.lines.len(),
            "checkout complete"
        );
        Ok(order)
    }

    /// Confirm payment and check out.
    ///
    /// Requires a non-empty cart, a six-digit confirmation code and, when
    /// configured, that no cart event falls on a weekday before `today`.
    pub fn confirm_checkout(&mut self, code: &str, today: Weekday) -> Result<Order> {
        if self.cart.is_empty() {
            return Err(BoxOfficeError::EmptyCart);
        }
        validate_payment_code(code)?;
        if self.config.enforce_booking_days {
            for item in self.cart.items() {
                let event = self
                    .event(item.event_id)
                    .ok_or(BoxOfficeError::EventNotFound(item.event_id))?;
                check_booking_day(event, today)?;
            }
        }
        self.checkout()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Orders
    // ─────────────────────────────────────────────────────────────────────────

    /// All past orders, newest first.
    pub fn orders(&self) -> Result<Vec<Order>> {
        Ok(self.store.all_orders()?)
    }

    /// Write every order, newest first, to a plain-text report at `path`.
    ///
    /// Returns the number of orders written.
    pub fn export_orders(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let orders = self.orders()?;
        write_orders(path, &orders, &self.config.timestamp_format)?;
        info!(path = %path.display(), orders = orders.len(), "exported orders");
        Ok(orders.len())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Admin
    // ─────────────────────────────────────────────────────────────────────────

    /// Enable or disable an event. Idempotent.
    pub fn set_event_disabled(&mut self, id: EventId, disabled: bool) -> Result<()> {
        let idx = self.event_index(id)?;
        self.store.update_disabled(id, disabled)?;
        self.events[idx].disabled = disabled;
        info!(event_id = id.get(), disabled, "event availability changed");
        Ok(())
    }

    /// Add a new event unless one with the same (name, venue, date) exists.
    pub fn add_event(&mut self, draft: EventDraft) -> Result<EventId> {
        let key = draft.key();
        if self.events.iter().any(|e| e.same_key(&key)) {
            warn!(event = %key, "duplicate event rejected");
            return Err(BoxOfficeError::DuplicateEvent(key));
        }
        let id = self.store.insert_event(&draft)?;
        self.events.push(Event::from_draft(id, draft));
        info!(event_id = id.get(), event = %key, "event added");
        Ok(id)
    }

    /// Replace an existing event, keyed by `updated.id`.
    ///
    /// Rejected if the new (name, venue, date) belongs to a different event.
    pub fn edit_event(&mut self, updated: Event) -> Result<()> {
        let idx = self.event_index(updated.id)?;
        let key = updated.key();
        if self
            .events
            .iter()
            .any(|e| e.id != updated.id && e.same_key(&key))
        {
            warn!(event = %key, "edit would duplicate another event");
            return Err(BoxOfficeError::DuplicateEvent(key));
        }
        self.store.update_event(&updated)?;
        info!(event_id = updated.id.get(), event = %key, "event edited");
        self.events[idx] = updated;
        Ok(())
    }

    /// Delete an event and drop it from the cart. Order history rows that
    /// reference it are left alone.
    pub fn delete_event(&mut self, id: EventId) -> Result<()> {
        self.event_index(id)?;
        self.store.delete_event(id)?;
        self.events.retain(|e| e.id != id);
        self.cart.remove(id);
        info!(event_id = id.get(), "event deleted");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Users
    // ─────────────────────────────────────────────────────────────────────────

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    /// Replace the current user with a customer session (or none).
    pub fn set_current_user(&mut self, user: Option<User>) {
        self.session = user.map(Session::customer);
    }

    /// Fail with `NotAuthorized` unless an admin is signed in.
    pub fn require_admin(&self) -> Result<()> {
        match &self.session {
            Some(session) if session.is_admin() => Ok(()),
            _ => Err(BoxOfficeError::NotAuthorized("administrator required".into())),
        }
    }

    /// Sign in as the configured administrator or a registered user.
    pub fn login(&mut self, username: &str, password: &str) -> Result<Session> {
        let username = require_non_empty("username", username)?;
        require_non_empty("password", password)?;

        let session = if self.config.admin.matches(username, password) {
            Session::admin(username)
        } else {
            match self.store.find_user(username)? {
                Some(record) if record.password_hash.verify(password) => {
                    Session::customer(record.user)
                }
                _ => {
                    warn!(username, "login failed");
                    return Err(BoxOfficeError::InvalidCredentials);
                }
            }
        };

        info!(username, admin = session.is_admin(), "signed in");
        self.session = Some(session.clone());
        Ok(session)
    }

    /// Register a new user. The password is stored hashed.
    pub fn signup(&mut self, username: &str, password: &str, preferred_name: &str) -> Result<User> {
        let username = require_non_empty("username", username)?;
        require_non_empty("password", password)?;
        let preferred_name = require_non_empty("preferred name", preferred_name)?;

        if username == self.config.admin.username {
            return Err(BoxOfficeError::DuplicateUser(username.to_string()));
        }

        let record = UserRecord::new(User::new(username, preferred_name), password);
        self.store.create_user(&record)?;
        info!(username, "user registered");
        Ok(record.user)
    }

    /// Sign out and empty the cart.
    pub fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            debug!(username = %session.user.username, "signed out");
        }
        self.cart.clear();
    }
}

fn insufficient(shortfall: Shortfall) -> BoxOfficeError {
    BoxOfficeError::InsufficientAvailability {
        event: shortfall.event_id,
        requested: shortfall.requested,
        remaining: shortfall.remaining,
    }
}
