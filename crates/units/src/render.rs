use crate::error::UnitError;
use core_types::UnitSpec;

/// Rejects specs that would produce a broken unit file.
pub fn validate(spec: &UnitSpec) -> Result<(), UnitError> {
    let fields = [
        ("symbol", &spec.symbol),
        ("service_name", &spec.service_name),
        ("working_directory", &spec.working_directory),
        ("launcher", &spec.launcher),
        ("jar_path", &spec.jar_path),
        ("log_path", &spec.log_path),
        ("run_as_user", &spec.run_as_user),
    ];
    for (field, value) in fields {
        if value.trim().is_empty() {
            return Err(UnitError::EmptyField(field));
        }
        if value.contains(['\n', '\r']) {
            return Err(UnitError::Multiline {
                field,
                value: value.clone(),
            });
        }
    }
    Ok(())
}

/// Renders the systemd unit for one bot. Pure: same spec, same bytes.
pub fn render(spec: &UnitSpec) -> Result<String, UnitError> {
    validate(spec)?;

    Ok(format!(
        "[Unit]\n\
         Description=Trading Bot for {symbol}\n\
         After=network.target\n\
         \n\
         [Service]\n\
         User={user}\n\
         WorkingDirectory={dir}\n\
         ExecStart={launcher} {jar} {symbol}\n\
         StandardOutput=append:{log}\n\
         StandardError=append:{log}\n\
         Restart=on-failure\n\
         RestartSec=10\n\
         \n\
         [Install]\n\
         WantedBy=multi-user.target\n",
        symbol = spec.symbol,
        user = spec.run_as_user,
        dir = spec.working_directory,
        launcher = spec.launcher,
        jar = spec.jar_path,
        log = spec.log_path,
    ))
}
