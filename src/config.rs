use std::collections::hash_map::RandomState;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::result::Result as DefaultResult;

use serde::de::{Error as DeserializeError, Expected};
use serde::Deserialize;

use crate::constant as AppConst;
use crate::error::{AppError, AppErrorCode};
use crate::AppLogAlias;

#[derive(Deserialize)]
pub struct AppLogHandlerCfg {
    pub min_level: AppConst::logging::Level,
    pub destination: AppConst::logging::Destination,
    pub alias: AppLogAlias,
    pub path: Option<String>,
}

#[derive(Deserialize)]
pub struct AppLoggerCfg {
    pub alias: AppLogAlias,
    pub handlers: Vec<String>,
    pub level: Option<AppConst::logging::Level>,
}

#[derive(Deserialize)]
pub struct AppLoggingCfg {
    pub handlers: Vec<AppLogHandlerCfg>,
    pub loggers: Vec<AppLoggerCfg>,
}

#[derive(Deserialize, Clone)]
pub struct AppBackendCfg {
    #[serde(deserialize_with = "jsn_deny_empty_string")]
    pub host: String,
    pub port: u16,
    // whether to reach the origin through TLS
    pub secure: bool,
    pub timeout_secs: u16,
}

#[derive(Deserialize, Clone)]
pub struct AppCartSyncCfg {
    // quiet period of the debounced flush
    pub debounce_millisecs: u32,
    pub max_flush_attempts: u8,
    pub backoff_base_millisecs: u32,
}

#[derive(Deserialize)]
pub struct AppEngineCfg {
    pub logging: AppLoggingCfg,
    pub backend: AppBackendCfg,
    pub cart_sync: AppCartSyncCfg,
}

pub struct AppBasepathCfg {
    pub system: String,
    pub service: String,
}

pub struct AppConfig {
    pub basepath: AppBasepathCfg,
    pub engine: AppEngineCfg,
}

impl AppConfig {
    pub fn new(mut args: HashMap<String, String, RandomState>) -> DefaultResult<Self, AppError> {
        let sys_basepath = if let Some(s) = args.remove(AppConst::env_vars::SYS_BASEPATH) {
            s + "/"
        } else {
            return Err(AppError {
                detail: None,
                code: AppErrorCode::MissingSysBasePath,
            });
        };
        let app_basepath = if let Some(a) = args.remove(AppConst::env_vars::SERVICE_BASEPATH) {
            a + "/"
        } else {
            return Err(AppError {
                detail: None,
                code: AppErrorCode::MissingAppBasePath,
            });
        };
        let engine_cfg = if let Some(cfg_path) = args.remove(AppConst::env_vars::CFG_FILEPATH) {
            let fullpath = app_basepath.clone() + &cfg_path;
            Self::parse_from_file(fullpath)?
        } else {
            return Err(AppError {
                detail: None,
                code: AppErrorCode::MissingConfigPath,
            });
        };
        Ok(Self {
            engine: engine_cfg,
            basepath: AppBasepathCfg {
                system: sys_basepath,
                service: app_basepath,
            },
        })
    } // end of fn new

    // load and parse a config file with the given path
    pub fn parse_from_file(filepath: String) -> DefaultResult<AppEngineCfg, AppError> {
        let fileobj = File::open(filepath).map_err(|e| AppError {
            detail: Some(e.to_string()),
            code: AppErrorCode::IOerror(e.kind()),
        })?;
        let reader = BufReader::new(fileobj);
        match serde_json::from_reader::<BufReader<File>, AppEngineCfg>(reader) {
            Ok(jsnobj) => {
                Self::check_logging(&jsnobj.logging)?;
                Self::check_backend(&jsnobj.backend)?;
                Self::check_cart_sync(&jsnobj.cart_sync)?;
                Ok(jsnobj)
            }
            Err(e) => Err(AppError {
                detail: Some(e.to_string()),
                code: AppErrorCode::InvalidJsonFormat,
            }),
        }
    }

    fn check_backend(obj: &AppBackendCfg) -> DefaultResult<(), AppError> {
        if obj.port == 0 {
            let detail = Some("backend port must be non-zero".to_string());
            Err(AppError {
                detail,
                code: AppErrorCode::InvalidBackendCfg,
            })
        } else if obj.timeout_secs == 0 {
            let detail = Some("backend timeout must be non-zero".to_string());
            Err(AppError {
                detail,
                code: AppErrorCode::InvalidBackendCfg,
            })
        } else {
            Ok(())
        }
    }

    fn check_cart_sync(obj: &AppCartSyncCfg) -> DefaultResult<(), AppError> {
        let lo = AppConst::hard_limit::MIN_DEBOUNCE_MILLISECS;
        let hi = AppConst::hard_limit::MAX_DEBOUNCE_MILLISECS;
        if obj.debounce_millisecs < lo || obj.debounce_millisecs > hi {
            let detail = Some(format!("debounce out of range: [{lo}, {hi}]"));
            Err(AppError {
                detail,
                code: AppErrorCode::InvalidSyncCfg,
            })
        } else if obj.max_flush_attempts == 0
            || obj.max_flush_attempts > AppConst::hard_limit::MAX_FLUSH_ATTEMPTS
        {
            let detail = Some(format!(
                "flush attempts out of range: [1, {}]",
                AppConst::hard_limit::MAX_FLUSH_ATTEMPTS
            ));
            Err(AppError {
                detail,
                code: AppErrorCode::InvalidSyncCfg,
            })
        } else if obj.backoff_base_millisecs == 0 {
            let detail = Some("backoff base must be non-zero".to_string());
            Err(AppError {
                detail,
                code: AppErrorCode::InvalidSyncCfg,
            })
        } else {
            Ok(())
        }
    }

    fn check_logging(obj: &AppLoggingCfg) -> DefaultResult<(), AppError> {
        let mut filtered = obj.loggers.iter().filter(|item| item.handlers.is_empty());
        let mut filtered2 = obj.handlers.iter().filter(|item| {
            match &item.destination {
                AppConst::logging::Destination::LOCALFS => item.path.is_none(),
                _other => false,
            } // for file-type handler, the field `path` has to be provided
        });
        let mut filtered3 = obj.handlers.iter().filter(|item| item.alias.is_empty());
        let mut filtered4 = obj.loggers.iter().filter(|item| item.alias.is_empty());
        if obj.handlers.is_empty() {
            Err(AppError {
                detail: None,
                code: AppErrorCode::NoLogHandlerCfg,
            })
        } else if obj.loggers.is_empty() {
            Err(AppError {
                detail: None,
                code: AppErrorCode::NoLoggerCfg,
            })
        } else if let Some(alogger) = filtered.next() {
            let msg = format!("the logger does not have handler: {}", alogger.alias);
            Err(AppError {
                detail: Some(msg),
                code: AppErrorCode::NoHandlerInLoggerCfg,
            })
        } else if filtered3.next().is_some() {
            Err(AppError {
                detail: None,
                code: AppErrorCode::MissingAliasLogHdlerCfg,
            })
        } else if filtered4.next().is_some() {
            Err(AppError {
                detail: None,
                code: AppErrorCode::MissingAliasLoggerCfg,
            })
        } else if let Some(ahandler) = filtered2.next() {
            let msg = format!("file-type handler does not contain path: {}", ahandler.alias);
            Err(AppError {
                detail: Some(msg),
                code: AppErrorCode::InvalidHandlerLoggerCfg,
            })
        } else {
            let iter = obj.handlers.iter().map(|i| i.alias.as_str());
            let hdlr_alias_map: HashSet<&str> = HashSet::from_iter(iter);
            let mut filtered = obj.loggers.iter().filter(|item| {
                let mut inner_iter = item
                    .handlers
                    .iter()
                    .filter(|i| !hdlr_alias_map.contains(i.as_str()));
                inner_iter.next().is_some()
            }); // handler alias in each logger has to be present
            if let Some(alogger) = filtered.next() {
                let msg = format!("the logger contains invalid handler alias: {}", alogger.alias);
                Err(AppError {
                    detail: Some(msg),
                    code: AppErrorCode::InvalidHandlerLoggerCfg,
                })
            } else {
                Ok(())
            }
        }
    } // end of fn check_logging
} // end of impl AppConfig

struct ExpectNonEmptyString {
    min_len: u32,
}

impl Expected for ExpectNonEmptyString {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        let msg = format!("minimum string length >= {}", self.min_len);
        formatter.write_str(msg.as_str())
    }
}

fn jsn_deny_empty_string<'de, D>(raw: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match String::deserialize(raw) {
        Ok(s) => {
            if s.is_empty() {
                let unexp = s.len();
                let exp = ExpectNonEmptyString { min_len: 1 };
                Err(DeserializeError::invalid_length(unexp, &exp))
            } else {
                Ok(s)
            }
        }
        Err(e) => Err(e),
    }
}
