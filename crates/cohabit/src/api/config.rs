use std::{
  env::{self, VarError},
  fmt::Display,
  str::FromStr,
};

use crate::api::errors::AppError;

#[derive(Clone)]
pub struct Config {
  pub env: Env,
  pub listen_addr: String,

  // Data snapshot and user state
  pub data_dir: String,
  pub state_path: String,

  // Personalization
  pub scoring_url: Option<String>,

  pub page_size: usize,
}

impl Config {
  pub fn from_env() -> Result<Config, AppError> {
    let config = Config {
      env: Env::from(env::var("ENV").unwrap_or("dev".into())),
      listen_addr: env::var("LISTEN_ADDR").unwrap_or("0.0.0.0:8000".into()),
      data_dir: env::var("DATA_DIR").unwrap_or("./data".into()),
      state_path: env::var("STATE_PATH").unwrap_or("./data/state.json".into()),
      scoring_url: env::var("SCORING_URL").ok(),
      page_size: parse_env("PAGE_SIZE", 30)?,
    };

    if config.page_size == 0 {
      return Err(AppError::ConfigError("PAGE_SIZE must be greater than zero".into()));
    }

    Ok(config)
  }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Env {
  Dev,
  Production,
}

impl From<String> for Env {
  fn from(value: String) -> Self {
    match value.as_ref() {
      "dev" => Env::Dev,
      "production" => Env::Production,
      _ => Env::Dev,
    }
  }
}

pub fn parse_env<T>(name: &str, default: T) -> anyhow::Result<T>
where
  T: FromStr,
  T::Err: Display,
{
  match env::var(name) {
    Ok(value) if value.is_empty() => Ok(default),
    Ok(value) => Ok(value.parse::<T>().map_err(|err| AppError::ConfigError(format!("could not read {name}: {err}")))?),
    Err(err) => match err {
      VarError::NotPresent => Ok(default),
      _ => Err(AppError::ConfigError(format!("could not read {name}: {err}")).into()),
    },
  }
}

#[cfg(test)]
mod tests {
  use std::env;

  use super::{Config, Env};

  #[serial_test::serial]
  #[test]
  fn parse_config_from_env() {
    unsafe {
      env::set_var("ENV", "production");
      env::set_var("LISTEN_ADDR", "0.0.0.0:8080");
      env::set_var("DATA_DIR", "/var/lib/cohabit");
      env::set_var("STATE_PATH", "/var/lib/cohabit/state.json");
      env::set_var("SCORING_URL", "http://scoring");
      env::set_var("PAGE_SIZE", "10");
    }

    let config = Config::from_env().unwrap();

    assert_eq!(config.env, Env::Production);
    assert_eq!(config.listen_addr, "0.0.0.0:8080");
    assert_eq!(config.data_dir, "/var/lib/cohabit");
    assert_eq!(config.state_path, "/var/lib/cohabit/state.json");
    assert_eq!(config.scoring_url, Some("http://scoring".to_string()));
    assert_eq!(config.page_size, 10);

    unsafe {
      env::remove_var("ENV");
      env::remove_var("LISTEN_ADDR");
      env::remove_var("DATA_DIR");
      env::remove_var("STATE_PATH");
      env::remove_var("SCORING_URL");
      env::remove_var("PAGE_SIZE");
    }
  }

  #[serial_test::serial]
  #[test]
  fn zero_page_size_is_rejected() {
    unsafe {
      env::set_var("PAGE_SIZE", "0");
    }

    assert!(Config::from_env().is_err());

    unsafe {
      env::remove_var("PAGE_SIZE");
    }
  }

  #[serial_test::serial]
  #[test]
  fn parse_env() {
    unsafe {
      env::set_var("INT", "42");
      env::set_var("BOOL", "true");
    }

    assert_eq!(super::parse_env::<u32>("INT", 0).unwrap(), 42);
    assert_eq!(super::parse_env::<bool>("BOOL", false).unwrap(), true);
    assert_eq!(super::parse_env::<u32>("ABSENT", 7).unwrap(), 7);

    assert!(matches!(super::parse_env::<u32>("BOOL", 0), Err(_)));

    unsafe {
      env::remove_var("INT");
      env::remove_var("BOOL");
    }
  }
}
