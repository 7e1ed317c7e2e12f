//! JNI entry points for Android hosts.
//!
//! The application shell calls `startServer`/`stopServer` through a
//! `NativeBridge` Kotlin object; both forward into the process-wide
//! [`AgentGateway`](crate::gateway::AgentGateway). The accessibility layer
//! registers its automation driver with the gateway's registry on service
//! connect and unregisters on disconnect.

use std::path::PathBuf;
use std::sync::Once;

use jni::objects::{JClass, JString};
use jni::sys::jstring;
use jni::JNIEnv;
use log::LevelFilter;

use crate::gateway::AgentGateway;

static INIT: Once = Once::new();

fn init_logging() {
    INIT.call_once(|| {
        android_logger::init_once(
            android_logger::Config::default()
                .with_max_level(LevelFilter::Info)
                .with_tag("tapbridge"),
        );
    });
}

fn to_jstring(env: &JNIEnv, s: &str) -> jstring {
    match env.new_string(s) {
        Ok(out) => out.into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

#[no_mangle]
pub extern "system" fn Java_com_tapbridge_app_NativeBridge_startServer(
    mut env: JNIEnv,
    _class: JClass,
    config_path: JString,
) -> jstring {
    init_logging();

    let config_path: PathBuf = match env.get_string(&config_path) {
        Ok(s) => PathBuf::from(String::from(s)),
        Err(e) => {
            log::error!("invalid config path argument: {e}");
            return to_jstring(&env, "agent failed to start: invalid config path");
        }
    };

    log::info!("starting embedded agent with config {:?}", config_path);
    let status = AgentGateway::global().start(&config_path);
    to_jstring(&env, &status)
}

#[no_mangle]
pub extern "system" fn Java_com_tapbridge_app_NativeBridge_stopServer(
    env: JNIEnv,
    _class: JClass,
) -> jstring {
    init_logging();

    let status = AgentGateway::global().stop();
    log::info!("stop requested: {status}");
    to_jstring(&env, &status)
}
