//! Typed wrappers for the event-server method catalog.
//!
//! Each wrapper is a thin façade over [`EventClient::call`]: fixed method
//! name, fixed positional parameter order, fixed result shape, no logic of
//! its own. Method semantics are documented in the PHD2 EventMonitoring
//! wiki; wrappers whose wire result is a status integer the caller never
//! inspects return `Result<()>`.

use serde_json::json;

use phd2_protocol::types::{
    CalibrationData, CoolerStatus, CurrentEquipment, LockShiftParams, Profile, SavedImage, Settle,
};

use crate::client::EventClient;
use crate::connector::Connector;
use crate::error::{Error, Result};

impl<C: Connector> EventClient<C> {
    /// Get the current exposure duration in milliseconds.
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn get_exposure(&self) -> Result<i32> {
        self.call("get_exposure", Vec::new()).await
    }

    /// Capture one frame of `duration` seconds with the given subframe
    /// (x, y, width, height).
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn capture_single_frame(&self, duration: i32, subframe: [i32; 4]) -> Result<()> {
        let _: i32 = self
            .call("capture_single_frame", vec![json!(duration), json!(subframe)])
            .await?;
        Ok(())
    }

    /// Clear calibration data for `"mount"`, `"ao"`, or `"both"`, forcing
    /// re-calibration.
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn clear_calibration(&self, which: &str) -> Result<()> {
        let _: i32 = self.call("clear_calibration", vec![json!(which)]).await?;
        Ok(())
    }

    /// Dither by up to `pixels`, then settle within the given tolerance.
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn dither(&self, pixels: f64, ra_only: bool, settle: &Settle) -> Result<()> {
        let _: i32 = self
            .call(
                "dither",
                vec![json!(pixels), json!(ra_only), serde_json::to_value(settle)?],
            )
            .await?;
        Ok(())
    }

    /// Auto-select a guide star; returns its lock position.
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn find_star(&self) -> Result<Vec<f64>> {
        self.call("find_star", Vec::new()).await
    }

    /// Flip the calibration data.
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn flip_calibration(&self) -> Result<()> {
        let _: i32 = self.call("flip_calibration", Vec::new()).await?;
        Ok(())
    }

    /// Get the current application state string (as in the `AppState` event).
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn get_app_state(&self) -> Result<String> {
        self.call("get_app_state", Vec::new()).await
    }

    /// Whether the mount is calibrated.
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn get_calibrated(&self) -> Result<bool> {
        self.call("get_calibrated", Vec::new()).await
    }

    /// Whether all equipment is connected.
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn get_connected(&self) -> Result<bool> {
        self.call("get_connected", Vec::new()).await
    }

    /// Names of the tunable parameters of the guide algorithm on `axis`
    /// (`"ra"`, `"x"`, `"dec"`, or `"y"`).
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn get_algo_param_names(&self, axis: &str) -> Result<Vec<String>> {
        self.call("get_algo_param_names", vec![json!(axis)]).await
    }

    /// Value of guide algorithm parameter `param` on `axis`.
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn get_algo_param(&self, axis: &str, param: &str) -> Result<f64> {
        self.call("get_algo_param", vec![json!(axis), json!(param)])
            .await
    }

    /// Calibration data for `"mount"` or `"ao"`.
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn get_calibration_data(&self, which: &str) -> Result<CalibrationData> {
        self.call("get_calibration_data", vec![json!(which)]).await
    }

    /// Camera cooler status.
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn get_cooler_status(&self) -> Result<CoolerStatus> {
        self.call("get_cooler_status", Vec::new()).await
    }

    /// Names and connection state of the current equipment profile's
    /// devices.
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn get_current_equipment(&self) -> Result<CurrentEquipment> {
        self.call("get_current_equipment", Vec::new()).await
    }

    /// Dec guide mode: `"Off"`, `"Auto"`, `"North"`, or `"South"`.
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn get_dec_guide_mode(&self) -> Result<String> {
        self.call("get_dec_guide_mode", Vec::new()).await
    }

    /// Supported exposure durations, in milliseconds.
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn get_exposure_durations(&self) -> Result<Vec<i32>> {
        self.call("get_exposure_durations", Vec::new()).await
    }

    /// Current lock position, or an empty list if none is set.
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn get_lock_position(&self) -> Result<Vec<i32>> {
        self.call("get_lock_position", Vec::new()).await
    }

    /// Whether lock-shift is enabled.
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn get_lock_shift_enabled(&self) -> Result<bool> {
        self.call("get_lock_shift_enabled", Vec::new()).await
    }

    /// Current lock-shift parameters.
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn get_lock_shift_params(&self) -> Result<LockShiftParams> {
        self.call("get_lock_shift_params", Vec::new()).await
    }

    /// Whether guiding is paused.
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn get_paused(&self) -> Result<bool> {
        self.call("get_paused", Vec::new()).await
    }

    /// Guider image scale in arc-sec/pixel.
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn get_pixel_scale(&self) -> Result<f64> {
        self.call("get_pixel_scale", Vec::new()).await
    }

    /// The currently selected equipment profile.
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn get_profile(&self) -> Result<Profile> {
        self.call("get_profile", Vec::new()).await
    }

    /// All available equipment profiles.
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn get_profiles(&self) -> Result<Vec<Profile>> {
        self.call("get_profiles", Vec::new()).await
    }

    /// Search region radius, in pixels.
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn get_search_region(&self) -> Result<i32> {
        self.call("get_search_region", Vec::new()).await
    }

    /// Camera sensor temperature in degrees C.
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn get_sensor_temperature(&self) -> Result<f64> {
        self.call("get_sensor_temperature", Vec::new()).await
    }

    /// Retrieving the star image is not supported by this client.
    ///
    /// # Errors
    /// Always returns [`Error::NotImplemented`].
    pub fn get_star_image(&self) -> Result<()> {
        Err(Error::NotImplemented)
    }

    /// Whether subframes are in use.
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn get_use_subframes(&self) -> Result<bool> {
        self.call("get_use_subframes", Vec::new()).await
    }

    /// Start guiding, settling within the given tolerance; `recalibrate`
    /// forces calibration first.
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn guide(&self, settle: &Settle, recalibrate: bool) -> Result<()> {
        let _: i32 = self
            .call(
                "guide",
                vec![serde_json::to_value(settle)?, json!(recalibrate)],
            )
            .await?;
        Ok(())
    }

    /// Issue a guide pulse of `amount` milliseconds (or AO step units) in
    /// `direction` on device `which`.
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn guide_pulse(&self, amount: i32, direction: &str, which: &str) -> Result<()> {
        let _: i32 = self
            .call(
                "guide_pulse",
                vec![json!(amount), json!(direction), json!(which)],
            )
            .await?;
        Ok(())
    }

    /// Start looping exposures.
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn loop_exposures(&self) -> Result<()> {
        let _: i32 = self.call("loop", Vec::new()).await?;
        Ok(())
    }

    /// Save the current image; returns the server-side filename.
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn save_image(&self) -> Result<String> {
        let saved: SavedImage = self.call("save_image", Vec::new()).await?;
        Ok(saved.filename)
    }

    /// Set guide algorithm parameter `name` on `axis`.
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn set_algo_param(&self, axis: &str, name: &str, value: f64) -> Result<()> {
        let _: i32 = self
            .call("set_algo_param", vec![json!(axis), json!(name), json!(value)])
            .await?;
        Ok(())
    }

    /// Connect or disconnect all equipment.
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn set_connected(&self, connect: bool) -> Result<()> {
        let _: i32 = self.call("set_connected", vec![json!(connect)]).await?;
        Ok(())
    }

    /// Set the Dec guide mode: `"Off"`, `"Auto"`, `"North"`, or `"South"`.
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn set_dec_guide_mode(&self, mode: &str) -> Result<()> {
        let _: i32 = self.call("set_dec_guide_mode", vec![json!(mode)]).await?;
        Ok(())
    }

    /// Set the exposure duration in milliseconds.
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn set_exposure(&self, length: i32) -> Result<()> {
        let _: i32 = self.call("set_exposure", vec![json!(length)]).await?;
        Ok(())
    }

    /// Set the lock position to (x, y); `exact` moves the lock position
    /// there rather than to the nearest star.
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn set_lock_position(&self, x: f64, y: f64, exact: bool) -> Result<()> {
        let _: i32 = self
            .call("set_lock_position", vec![json!(x), json!(y), json!(exact)])
            .await?;
        Ok(())
    }

    /// Enable or disable lock-shift.
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn set_lock_shift_enabled(&self, enable: bool) -> Result<()> {
        let _: i32 = self
            .call("set_lock_shift_enabled", vec![json!(enable)])
            .await?;
        Ok(())
    }

    /// Set the lock-shift parameters.
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn set_lock_shift_params(&self, params: &LockShiftParams) -> Result<()> {
        let _: i32 = self
            .call("set_lock_shift_params", vec![serde_json::to_value(params)?])
            .await?;
        Ok(())
    }

    /// Pause or resume guiding. With `full`, looping exposures pauses too.
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn set_paused(&self, paused: bool, full: bool) -> Result<()> {
        let mut params = vec![json!(paused)];
        if full {
            params.push(json!("full"));
        }
        let _: i32 = self.call("set_paused", params).await?;
        Ok(())
    }

    /// Select the equipment profile with the given id (equipment must be
    /// disconnected).
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn set_profile(&self, id: i32) -> Result<()> {
        let _: i32 = self.call("set_profile", vec![json!(id)]).await?;
        Ok(())
    }

    /// Close the PHD2 application.
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn shutdown(&self) -> Result<()> {
        let _: i32 = self.call("shutdown", Vec::new()).await?;
        Ok(())
    }

    /// Stop capturing (and therefore guiding).
    ///
    /// # Errors
    /// See [`EventClient::call`].
    pub async fn stop_capture(&self) -> Result<()> {
        let _: i32 = self.call("stop_capture", Vec::new()).await?;
        Ok(())
    }
}
