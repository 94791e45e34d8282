//! Application context - dependency injection container

use std::sync::Arc;

use bookslot_core::{
    BookingService, ChatFrontend, Clock, ReminderScheduler as ReminderSchedulerPort,
    ScheduleStore as ScheduleStorePort, SystemClock,
};
use bookslot_domain::{BookslotError, Config, Result};
use bookslot_infra::scheduling::{CronReminderScheduler, ReminderSchedulerConfig};
use bookslot_infra::sheets::{SheetsClient, SheetsScheduleStore, StaticTokenProvider};
use bookslot_infra::telegram::TelegramClient;

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub booking: Arc<BookingService>,
    pub frontend: Arc<ChatFrontend>,
    pub reminders: Arc<CronReminderScheduler>,
    pub telegram: Arc<TelegramClient>,
}

impl AppContext {
    /// Build the object graph from configuration.
    ///
    /// The reminder scheduler is created but not started; the entry point
    /// calls `start()` and spawns the reconstruction pass.
    pub async fn new(config: Config) -> Result<Self> {
        let tokens = Arc::new(StaticTokenProvider::new(config.store.access_token.clone()));
        let sheets = SheetsClient::new(&config.store, tokens)?;
        let store: Arc<dyn ScheduleStorePort> =
            Arc::new(SheetsScheduleStore::new(sheets, config.store.worksheet.clone()));

        let telegram = Arc::new(TelegramClient::new(&config.telegram)?);
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let reminders = Arc::new(
            CronReminderScheduler::new(
                ReminderSchedulerConfig::new(config.schedule.timezone, &config.reminders),
                store.clone(),
                telegram.clone(),
                clock.clone(),
            )
            .await
            .map_err(BookslotError::from)?,
        );

        let booking = Arc::new(BookingService::new(
            store,
            reminders.clone() as Arc<dyn ReminderSchedulerPort>,
            clock,
            config.schedule.timezone,
        ));
        let frontend = Arc::new(ChatFrontend::new(booking.clone(), config.schedule.page_size));

        Ok(Self { config, booking, frontend, reminders, telegram })
    }
}
