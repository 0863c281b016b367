use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;

use crate::{
    config::DefaultCity,
    model::{City, Weather},
    usecase::GetWeatherUseCase,
};

use super::{Generation, TaskSlot};

#[derive(Debug, Clone, PartialEq)]
pub enum WeatherUiState {
    Loading,
    Success(Weather),
    Error(String),
}

impl WeatherUiState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Coordinates plus the label shown for them.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
}

impl From<&City> for WeatherRequest {
    fn from(city: &City) -> Self {
        Self {
            latitude: city.latitude,
            longitude: city.longitude,
            label: city.display_name(),
        }
    }
}

impl From<&DefaultCity> for WeatherRequest {
    fn from(city: &DefaultCity) -> Self {
        Self {
            latitude: city.latitude,
            longitude: city.longitude,
            label: city.name.clone(),
        }
    }
}

#[derive(Debug, Default)]
struct Loads {
    task: TaskSlot,
    last: Option<WeatherRequest>,
}

/// Weather load/retry state over [`GetWeatherUseCase`].
///
/// Every load resets the state to `Loading` before the fetch starts; an older
/// load still in flight is cancelled and can no longer write state.
/// Must be used from within a Tokio runtime.
#[derive(Debug)]
pub struct WeatherViewModel {
    use_case: GetWeatherUseCase,
    state: Arc<watch::Sender<WeatherUiState>>,
    generation: Arc<Generation>,
    loads: Mutex<Loads>,
    default_location: WeatherRequest,
}

impl WeatherViewModel {
    pub fn new(use_case: GetWeatherUseCase, default_location: WeatherRequest) -> Self {
        let (state, _) = watch::channel(WeatherUiState::Loading);
        Self {
            use_case,
            state: Arc::new(state),
            generation: Arc::default(),
            loads: Mutex::new(Loads::default()),
            default_location,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<WeatherUiState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> WeatherUiState {
        self.state.borrow().clone()
    }

    /// The request `retry()` would replay.
    pub fn last_request(&self) -> Option<WeatherRequest> {
        self.loads.lock().last.clone()
    }

    pub fn load_default_city(&self) {
        self.load(self.default_location.clone());
    }

    pub fn load_city(&self, city: &City) {
        self.load(WeatherRequest::from(city));
    }

    /// Replay the most recent load, or the default location if nothing was loaded yet.
    pub fn retry(&self) {
        let last = self.last_request();
        self.load(last.unwrap_or_else(|| self.default_location.clone()));
    }

    pub fn load(&self, request: WeatherRequest) {
        let mut loads = self.loads.lock();
        let token = self.generation.advance();
        self.state.send_replace(WeatherUiState::Loading);
        loads.last = Some(request.clone());

        tracing::info!(
            label = %request.label,
            latitude = request.latitude,
            longitude = request.longitude,
            "loading weather"
        );

        let use_case = self.use_case.clone();
        let state = Arc::clone(&self.state);
        let generation = Arc::clone(&self.generation);
        loads.task.replace(tokio::spawn(async move {
            let result = use_case
                .execute(request.latitude, request.longitude, &request.label)
                .await;

            let next = match result {
                Ok(weather) => WeatherUiState::Success(weather),
                Err(error) => {
                    tracing::info!(label = %request.label, %error, "weather load failed");
                    WeatherUiState::Error(error.user_message())
                }
            };

            if !generation.publish(&state, token, |current| *current = next) {
                tracing::debug!(token, "discarding superseded weather load");
            }
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::{AppError, AppResult},
        repository::WeatherRepository,
    };
    use async_trait::async_trait;
    use std::{collections::VecDeque, time::Duration};
    use tokio::time::sleep;

    type Call = (f64, f64, String);

    /// Plays back scripted outcomes; once exhausted, always succeeds at 18 °C.
    #[derive(Debug, Default)]
    struct ScriptedWeather {
        calls: Mutex<Vec<Call>>,
        script: Mutex<VecDeque<AppResult<()>>>,
        slow_latitude: Option<f64>,
    }

    impl ScriptedWeather {
        fn failing_first() -> Self {
            Self {
                script: Mutex::new(VecDeque::from([Err(AppError::Network)])),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl WeatherRepository for ScriptedWeather {
        async fn get_weather(
            &self,
            latitude: f64,
            longitude: f64,
            city_name: &str,
        ) -> AppResult<Weather> {
            self.calls.lock().push((latitude, longitude, city_name.to_string()));
            if self.slow_latitude == Some(latitude) {
                sleep(Duration::from_secs(3)).await;
            }
            let scripted = self.script.lock().pop_front();
            scripted.unwrap_or(Ok(()))?;

            Ok(Weather {
                city: city_name.to_string(),
                temperature_c: 18,
                description: "Clear sky".into(),
                weather_code: 0,
                hourly: vec![],
                daily: vec![],
            })
        }
    }

    fn paris() -> City {
        City {
            name: "Paris".into(),
            country: "France".into(),
            region: None,
            latitude: 48.8566,
            longitude: 2.3522,
        }
    }

    fn oslo() -> City {
        City {
            name: "Oslo".into(),
            country: "Norway".into(),
            region: None,
            latitude: 59.9127,
            longitude: 10.7461,
        }
    }

    fn view_model(repo: ScriptedWeather) -> (WeatherViewModel, Arc<ScriptedWeather>) {
        let repo = Arc::new(repo);
        let vm = WeatherViewModel::new(
            GetWeatherUseCase::new(repo.clone()),
            WeatherRequest::from(&DefaultCity::default()),
        );
        (vm, repo)
    }

    async fn settled(vm: &WeatherViewModel) -> WeatherUiState {
        let mut rx = vm.subscribe();
        let state = rx
            .wait_for(|s| !s.is_loading())
            .await
            .expect("view model alive")
            .clone();
        state
    }

    #[tokio::test]
    async fn starts_loading() {
        let (vm, repo) = view_model(ScriptedWeather::default());

        assert_eq!(vm.state(), WeatherUiState::Loading);
        assert!(repo.calls.lock().is_empty());
        assert_eq!(vm.last_request(), None);
    }

    #[tokio::test]
    async fn load_city_passes_through_loading_to_success() {
        let (vm, repo) = view_model(ScriptedWeather::default());

        vm.load_city(&paris());
        assert_eq!(vm.state(), WeatherUiState::Loading);

        let WeatherUiState::Success(weather) = settled(&vm).await else {
            panic!("expected success");
        };

        assert_eq!(weather.city, "Paris, France");
        assert_eq!(weather.temperature_c, 18);
        assert_eq!(
            *repo.calls.lock(),
            vec![(48.8566, 2.3522, "Paris, France".to_string())]
        );
    }

    #[tokio::test]
    async fn reload_discards_previous_success_immediately() {
        let (vm, _repo) = view_model(ScriptedWeather::default());

        vm.load_city(&paris());
        settled(&vm).await;
        vm.load_city(&oslo());

        assert_eq!(vm.state(), WeatherUiState::Loading);
    }

    #[tokio::test]
    async fn failure_shows_network_message() {
        let (vm, _repo) = view_model(ScriptedWeather::failing_first());

        vm.load_city(&paris());

        assert_eq!(
            settled(&vm).await,
            WeatherUiState::Error(AppError::Network.user_message())
        );
    }

    #[tokio::test]
    async fn retry_replays_the_failed_city_not_the_default() {
        let (vm, repo) = view_model(ScriptedWeather::failing_first());

        vm.load_city(&paris());
        settled(&vm).await;
        vm.retry();
        assert_eq!(vm.state(), WeatherUiState::Loading);
        let state = settled(&vm).await;

        assert!(matches!(state, WeatherUiState::Success(ref w) if w.city == "Paris, France"));
        let calls = repo.calls.lock();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], calls[1]);
        assert_eq!(calls[1].2, "Paris, France");
    }

    #[tokio::test]
    async fn load_default_uses_configured_location() {
        let (vm, repo) = view_model(ScriptedWeather::default());

        vm.load_default_city();
        settled(&vm).await;

        assert_eq!(*repo.calls.lock(), vec![(48.8566, 2.3522, "Paris".to_string())]);
        assert_eq!(vm.last_request().map(|r| r.label), Some("Paris".to_string()));
    }

    #[tokio::test]
    async fn retry_before_any_load_falls_back_to_default() {
        let (vm, repo) = view_model(ScriptedWeather::default());

        vm.retry();
        settled(&vm).await;

        assert_eq!(repo.calls.lock()[0].2, "Paris");
    }

    #[tokio::test(start_paused = true)]
    async fn newer_load_wins_over_slower_older_one() {
        let (vm, _repo) = view_model(ScriptedWeather {
            slow_latitude: Some(48.8566),
            ..Default::default()
        });

        vm.load_city(&paris());
        tokio::task::yield_now().await;
        vm.load_city(&oslo());
        sleep(Duration::from_secs(5)).await;

        match vm.state() {
            WeatherUiState::Success(weather) => assert_eq!(weather.city, "Oslo, Norway"),
            other => panic!("unexpected state: {other:?}"),
        }
        assert_eq!(vm.last_request().map(|r| r.label), Some("Oslo, Norway".to_string()));
    }
}
