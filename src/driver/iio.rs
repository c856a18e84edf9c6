use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use log::debug;

use super::{DriverError, SensorDriver};

/// Climate sensor exposed through the Linux industrial I/O (iio) sysfs
/// interface, e.g. a BME280 bound to `/sys/bus/iio/devices/iio:device0`.
///
/// Channel files and their kernel units:
///
/// - `in_humidityrelative_input`: milli-percent
/// - `in_temp_input`: milli-°C
/// - `in_pressure_input`: kPa
///
/// Kernel iio sysfs ABI: https://www.kernel.org/doc/html/latest/driver-api/iio/core.html
#[derive(Debug)]
pub struct IioDriver {
    device: PathBuf,
}

impl IioDriver {
    pub fn new<P: AsRef<Path>>(device: P) -> Result<Self, DriverError> {
        let device = device.as_ref().to_path_buf();
        if !device.is_dir() {
            return Err(DriverError::DeviceNotFound(device));
        }
        Ok(Self { device })
    }

    /// Read one channel file and parse it as a float. Channel files hold a
    /// single line, so a small fixed buffer is enough.
    fn read_channel(&self, channel: &str) -> Result<f64, DriverError> {
        let path = self.device.join(channel);
        let mut reader = String::with_capacity(32);
        let mut f = File::open(&path).map_err(|source| DriverError::ChannelRead {
            channel: channel.to_string(),
            source,
        })?;
        f.read_to_string(&mut reader)
            .map_err(|source| DriverError::ChannelRead {
                channel: channel.to_string(),
                source,
            })?;
        let value = reader.trim();
        let parsed = value
            .parse::<f64>()
            .map_err(|_| DriverError::Malformed {
                channel: channel.to_string(),
                value: value.to_string(),
            })?;
        debug!("{} = {}", channel, parsed);
        Ok(parsed)
    }
}

impl SensorDriver for IioDriver {
    fn read_humidity(&mut self) -> Result<f64, DriverError> {
        // milli-percent to percent
        Ok(self.read_channel("in_humidityrelative_input")? / 1000.0)
    }

    fn read_temperature(&mut self) -> Result<f64, DriverError> {
        // milli-°C to °C
        Ok(self.read_channel("in_temp_input")? / 1000.0)
    }

    fn read_pressure(&mut self) -> Result<f64, DriverError> {
        // kPa to hPa
        Ok(self.read_channel("in_pressure_input")? * 10.0)
    }

    fn banner(&self) -> String {
        let name = read_name(&self.device).unwrap_or_else(|| "unknown sensor".into());
        format!("{} at {}", name, self.device.display())
    }
}

// Read the device `name` file, if present.
fn read_name(device: &Path) -> Option<String> {
    let mut reader = String::with_capacity(16);
    let mut f = File::open(device.join("name")).ok()?;
    f.read_to_string(&mut reader).ok()?;
    reader.truncate(reader.trim_end().len());
    Some(reader)
}
