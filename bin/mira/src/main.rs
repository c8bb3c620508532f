use mira::report::{Detail, Overview, Trend};
use mira::{History, Result, Session};

use std::time::Duration;

use airwave::{Api, Select, SessionType};
use log::{error, info};
use tokio::time;

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init();

    let http_url = std::env::var("AIRWAVE_HTTP_URL").expect("set ENV variable AIRWAVE_HTTP_URL");
    let ws_url = std::env::var("AIRWAVE_WS_URL").expect("set ENV variable AIRWAVE_WS_URL");

    let scope = match std::env::var("MIRA_DEVICE") {
        Ok(id) => SessionType::Child(id),
        Err(_) => SessionType::Main,
    };

    let select: Select = match std::env::var("MIRA_RANGE") {
        Ok(value) => value.parse().expect("set MIRA_RANGE to 24H or 7D"),
        Err(_) => Select::Hours24,
    };

    let api = Api::new(&http_url);

    let mut session = Session::new(api.clone(), ws_url, scope.clone()).await?;

    for state in session.fleet().snapshot() {
        info!("{}", Overview(&state));
    }

    if let SessionType::Child(id) = &scope {
        if let Some(state) = session.fleet().device(id) {
            info!("{}", Detail(state));
        }

        let mut history = History::new(id.clone(), Select::Hours24);

        match history.refresh(&api).await {
            Ok(()) => info!("{}", Trend(&history)),
            Err(err) => error!("error fetching history: {err}"),
        }

        if select != history.select() {
            match history.change_select(&api, select).await {
                Ok(()) => info!("{}", Trend(&history)),
                Err(err) => error!("error switching range, keeping {}: {err}", history.select()),
            }
        }
    }

    tokio::select! {
        result = sync(&mut session) => result?,
        _ = tokio::signal::ctrl_c() => info!("received interrupt"),
    }

    session.close().await;

    Ok(())
}

async fn sync(session: &mut Session) -> Result<()> {
    let mut delay = Duration::from_secs(1);

    loop {
        if let Err(err) = session.run().await {
            error!("lost airwave connection: {err}");
        }

        loop {
            info!("reconnecting in {}s", delay.as_secs());
            time::sleep(delay).await;

            match session.reconnect().await {
                Ok(()) => {
                    delay = Duration::from_secs(1);
                    break;
                }
                Err(err) => {
                    error!("error reconnecting: {err}");
                    delay = (delay * 2).min(Duration::from_secs(60));
                }
            }
        }
    }
}
