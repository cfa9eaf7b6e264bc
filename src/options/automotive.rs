use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::{clamp_slider, Labeled};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AutoShotType {
    Studio,
    Showroom,
    Outdoor,
    Detail,
    Action,
}

impl Labeled for AutoShotType {
    fn label(&self) -> &'static str {
        match self {
            AutoShotType::Studio => "Studio",
            AutoShotType::Showroom => "Showroom",
            AutoShotType::Outdoor => "Outdoor",
            AutoShotType::Detail => "Detail Shot",
            AutoShotType::Action => "Action Shot",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AutoAngle {
    ThreeQuarterFront,
    SideProfile,
    RearThreeQuarter,
    Front,
    Rear,
    Interior,
    WheelDetail,
    Engine,
}

impl Labeled for AutoAngle {
    fn label(&self) -> &'static str {
        match self {
            AutoAngle::ThreeQuarterFront => "3/4 Front (Hero)",
            AutoAngle::SideProfile => "Side Profile",
            AutoAngle::RearThreeQuarter => "3/4 Rear",
            AutoAngle::Front => "Front",
            AutoAngle::Rear => "Rear",
            AutoAngle::Interior => "Interior",
            AutoAngle::WheelDetail => "Wheel Detail",
            AutoAngle::Engine => "Engine Bay",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AutoEnvironment {
    DarkStudio,
    WhiteCyclorama,
    Showroom,
    UrbanStreet,
    MountainRoad,
    Coastal,
    Industrial,
    ParkingGarage,
}

impl Labeled for AutoEnvironment {
    fn label(&self) -> &'static str {
        match self {
            AutoEnvironment::DarkStudio => "Dark Studio",
            AutoEnvironment::WhiteCyclorama => "White Cyclorama",
            AutoEnvironment::Showroom => "Showroom",
            AutoEnvironment::UrbanStreet => "Urban Street",
            AutoEnvironment::MountainRoad => "Mountain Road",
            AutoEnvironment::Coastal => "Coastal Road",
            AutoEnvironment::Industrial => "Industrial",
            AutoEnvironment::ParkingGarage => "Parking Garage",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AutoLighting {
    Dramatic,
    SoftStudio,
    Natural,
    Neon,
    Sunset,
    Overcast,
}

impl Labeled for AutoLighting {
    fn label(&self) -> &'static str {
        match self {
            AutoLighting::Dramatic => "Dramatic",
            AutoLighting::SoftStudio => "Soft Studio",
            AutoLighting::Natural => "Natural",
            AutoLighting::Neon => "Neon",
            AutoLighting::Sunset => "Sunset/Golden Hour",
            AutoLighting::Overcast => "Overcast",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AutoOptions {
    pub shot_type: AutoShotType,
    pub angle: AutoAngle,
    pub environment: AutoEnvironment,
    pub lighting: AutoLighting,
    pub reflection_intensity: i32,
    pub dramatic_level: i32,
    /// Motion blur on the wheels.
    pub show_movement: bool,
    pub cleanup_reflections: bool,
    /// Chrome, paint and wheels.
    pub enhance_details: bool,
    pub strength: i32,
}

impl Default for AutoOptions {
    fn default() -> Self {
        Self {
            shot_type: AutoShotType::Studio,
            angle: AutoAngle::ThreeQuarterFront,
            environment: AutoEnvironment::DarkStudio,
            lighting: AutoLighting::Dramatic,
            reflection_intensity: 60,
            dramatic_level: 50,
            show_movement: false,
            cleanup_reflections: true,
            enhance_details: true,
            strength: 70,
        }
    }
}

impl AutoOptions {
    pub fn normalized(self) -> Self {
        Self {
            reflection_intensity: clamp_slider(
                "reflectionIntensity",
                self.reflection_intensity,
                0,
                100,
            ),
            dramatic_level: clamp_slider("dramaticLevel", self.dramatic_level, 0, 100),
            strength: clamp_slider("strength", self.strength, 0, 100),
            ..self
        }
    }
}
