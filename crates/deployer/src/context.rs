use crate::error::DeployError;
use configuration::DeploymentConfig;
use nix::unistd::{User, geteuid};
use std::path::PathBuf;
use units::UnitDefaults;

/// The identity the process actually runs with, as the kernel sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveUser {
    pub uid: u32,
    /// From the passwd database; `None` when the uid has no entry.
    pub name: Option<String>,
    pub home: Option<PathBuf>,
}

impl EffectiveUser {
    pub fn current() -> Self {
        let uid = geteuid();
        let entry = User::from_uid(uid).ok().flatten();
        Self {
            uid: uid.as_raw(),
            name: entry.as_ref().map(|u| u.name.clone()),
            home: entry.map(|u| u.dir),
        }
    }

    pub fn is_root(&self) -> bool {
        self.uid == 0
    }
}

/// Who we run as and where things go, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
    /// The operator the bots run as. Under sudo this is the invoking user, not root.
    pub user: String,
    pub home: PathBuf,
    /// Whether the effective user may write system units and drive systemctl.
    pub elevated: bool,
    pub working_dir: PathBuf,
    pub system_unit_dir: PathBuf,
}

impl ExecutionContext {
    pub fn from_env(config: &DeploymentConfig) -> Result<Self, DeployError> {
        Self::resolve(config, &EffectiveUser::current(), |key| std::env::var(key).ok())
    }

    /// Resolves the context from the effective identity and an environment accessor.
    ///
    /// Privilege comes from the effective uid only; `USER` and `LOGNAME` are
    /// consulted for the name when the uid has no passwd entry. `SUDO_USER`
    /// takes precedence for the operator so a `sudo` run still produces units
    /// owned by, and rooted in the home of, the person who typed the command.
    pub fn resolve<F>(config: &DeploymentConfig, effective: &EffectiveUser, lookup: F) -> Result<Self, DeployError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let elevated = effective.is_root();

        let (user, home) = match non_empty("SUDO_USER") {
            Some(delegated) => {
                let home = if delegated == "root" {
                    PathBuf::from("/root")
                } else {
                    PathBuf::from("/home").join(&delegated)
                };
                (delegated, home)
            }
            None => {
                let user = effective
                    .name
                    .clone()
                    .or_else(|| non_empty("USER"))
                    .or_else(|| non_empty("LOGNAME"))
                    .ok_or_else(|| {
                        DeployError::Environment(format!(
                            "uid {} has no passwd entry and neither USER nor LOGNAME is set",
                            effective.uid
                        ))
                    })?;
                let home = non_empty("HOME")
                    .map(PathBuf::from)
                    .or_else(|| effective.home.clone())
                    .ok_or_else(|| DeployError::Environment(format!("no home directory known for {user}")))?;
                (user, home)
            }
        };

        let working_dir = home.join(&config.bot_dir);

        Ok(Self {
            user,
            home,
            elevated,
            working_dir,
            system_unit_dir: config.system_unit_dir.clone(),
        })
    }

    /// The values shared by every unit rendered in this run.
    pub fn unit_defaults(&self, config: &DeploymentConfig) -> UnitDefaults {
        UnitDefaults {
            working_directory: self.working_dir.clone(),
            launcher: config.launcher.clone(),
            jar_path: self.working_dir.join(&config.jar_name),
            run_as_user: self.user.clone(),
            log_layout: config.log_layout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::Path;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    fn uid(uid: u32, name: &str, home: &str) -> EffectiveUser {
        EffectiveUser {
            uid,
            name: Some(name.to_string()),
            home: Some(PathBuf::from(home)),
        }
    }

    fn root() -> EffectiveUser {
        uid(0, "root", "/root")
    }

    fn unlisted(id: u32) -> EffectiveUser {
        EffectiveUser {
            uid: id,
            name: None,
            home: None,
        }
    }

    #[test]
    fn plain_user_uses_own_home() {
        let ctx = ExecutionContext::resolve(
            &DeploymentConfig::default(),
            &uid(1000, "alice", "/home/alice"),
            env(&[("USER", "alice"), ("HOME", "/home/alice")]),
        )
        .unwrap();

        assert_eq!(ctx.user, "alice");
        assert!(!ctx.elevated);
        assert_eq!(ctx.working_dir, Path::new("/home/alice/trader_bots"));
        assert_eq!(ctx.system_unit_dir, Path::new("/etc/systemd/system"));
    }

    #[test]
    fn sudo_resolves_to_delegating_user() {
        let ctx = ExecutionContext::resolve(
            &DeploymentConfig::default(),
            &root(),
            env(&[("USER", "root"), ("HOME", "/root"), ("SUDO_USER", "bob")]),
        )
        .unwrap();

        assert_eq!(ctx.user, "bob");
        assert_eq!(ctx.home, Path::new("/home/bob"));
        assert!(ctx.elevated);
        assert_eq!(ctx.working_dir, Path::new("/home/bob/trader_bots"));
    }

    #[test]
    fn root_without_sudo_stays_root() {
        let ctx = ExecutionContext::resolve(
            &DeploymentConfig::default(),
            &root(),
            env(&[("USER", "root"), ("HOME", "/root")]),
        )
        .unwrap();
        assert_eq!(ctx.user, "root");
        assert!(ctx.elevated);
        assert_eq!(ctx.working_dir, Path::new("/root/trader_bots"));
    }

    #[test]
    fn root_with_bare_environment_is_elevated() {
        // containers and cron jobs often run without USER or HOME
        let ctx = ExecutionContext::resolve(&DeploymentConfig::default(), &root(), env(&[])).unwrap();

        assert_eq!(ctx.user, "root");
        assert!(ctx.elevated);
        assert_eq!(ctx.working_dir, Path::new("/root/trader_bots"));
    }

    #[test]
    fn exported_user_root_does_not_grant_elevation() {
        let ctx = ExecutionContext::resolve(
            &DeploymentConfig::default(),
            &uid(1001, "eve", "/home/eve"),
            env(&[("USER", "root"), ("HOME", "/home/eve")]),
        )
        .unwrap();

        assert!(!ctx.elevated);
        assert_eq!(ctx.user, "eve");
    }

    #[test]
    fn empty_sudo_user_is_ignored() {
        let ctx = ExecutionContext::resolve(
            &DeploymentConfig::default(),
            &unlisted(1002),
            env(&[("LOGNAME", "carol"), ("HOME", "/srv/carol"), ("SUDO_USER", "")]),
        )
        .unwrap();
        assert_eq!(ctx.user, "carol");
        assert_eq!(ctx.home, Path::new("/srv/carol"));
        assert!(!ctx.elevated);
    }

    #[test]
    fn missing_identity_is_an_error() {
        let err = ExecutionContext::resolve(&DeploymentConfig::default(), &unlisted(1003), env(&[("HOME", "/x")]))
            .unwrap_err();
        assert!(matches!(err, DeployError::Environment(_)));

        let err = ExecutionContext::resolve(&DeploymentConfig::default(), &unlisted(1003), env(&[("USER", "alice")]))
            .unwrap_err();
        assert!(matches!(err, DeployError::Environment(_)));
    }

    #[test]
    fn unit_defaults_point_into_working_dir() {
        let config = DeploymentConfig::default();
        let ctx = ExecutionContext::resolve(
            &config,
            &uid(1000, "alice", "/home/alice"),
            env(&[("USER", "alice"), ("HOME", "/home/alice")]),
        )
        .unwrap();
        let defaults = ctx.unit_defaults(&config);

        assert_eq!(defaults.jar_path, Path::new("/home/alice/trader_bots/tradingbot.jar"));
        assert_eq!(defaults.run_as_user, "alice");
        assert_eq!(defaults.launcher, "/usr/bin/java -jar");
    }
}
