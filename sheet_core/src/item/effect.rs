//! Effect tokens - the `"<effectType>:<value>"` wire format carried by mods

use std::fmt;

/// Known effect types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EffectKind {
    // Additive
    DamageAdd,
    FireRateAdd,
    PhysicalResAdd,
    EnergyResAdd,
    RadiationResAdd,
    MeleeResAdd,
    ExplosiveResAdd,
    FallDamageResAdd,
    CarryWeightAdd,
    UnarmedDamageAdd,

    // Setters (last mod wins)
    DamageSet,
    DamageTypeChange,
    AmmoChange,
    AmmoConsumption,
    AllowMuzzleMod,
    RerollHitLocation,

    // Ordinal
    RangeIncrease,
    RangeDecrease,

    // Lists
    QualityAdd,
    QualityRemove,
    EffectAdd,
    EffectRemove,

    /// Handled outside the resolver
    MeleeDamage,

    Unknown(String),
}

impl EffectKind {
    pub fn from_key(key: &str) -> EffectKind {
        match key {
            "damageAdd" => EffectKind::DamageAdd,
            "fireRateAdd" => EffectKind::FireRateAdd,
            "physicalResAdd" | "damageReductionPhysicalAdd" => EffectKind::PhysicalResAdd,
            "energyResAdd" | "damageReductionEnergyAdd" => EffectKind::EnergyResAdd,
            "radiationResAdd" | "damageReductionRadiationAdd" => EffectKind::RadiationResAdd,
            "meleeResAdd" => EffectKind::MeleeResAdd,
            "explosiveResAdd" => EffectKind::ExplosiveResAdd,
            "fallDamageResAdd" => EffectKind::FallDamageResAdd,
            "carryWeightAdd" => EffectKind::CarryWeightAdd,
            "unarmedDamageAdd" => EffectKind::UnarmedDamageAdd,
            "damageSet" => EffectKind::DamageSet,
            "damageTypeChange" => EffectKind::DamageTypeChange,
            "ammoChange" => EffectKind::AmmoChange,
            "ammoConsumption" => EffectKind::AmmoConsumption,
            "allowMuzzleMod" => EffectKind::AllowMuzzleMod,
            "rerollHitLocation" => EffectKind::RerollHitLocation,
            "rangeIncrease" => EffectKind::RangeIncrease,
            "rangeDecrease" => EffectKind::RangeDecrease,
            "qualityAdd" => EffectKind::QualityAdd,
            "qualityRemove" => EffectKind::QualityRemove,
            "effectAdd" => EffectKind::EffectAdd,
            "effectRemove" => EffectKind::EffectRemove,
            "meleeDamage" => EffectKind::MeleeDamage,
            other => EffectKind::Unknown(other.to_string()),
        }
    }

    /// Canonical wire key
    pub fn key(&self) -> &str {
        match self {
            EffectKind::DamageAdd => "damageAdd",
            EffectKind::FireRateAdd => "fireRateAdd",
            EffectKind::PhysicalResAdd => "physicalResAdd",
            EffectKind::EnergyResAdd => "energyResAdd",
            EffectKind::RadiationResAdd => "radiationResAdd",
            EffectKind::MeleeResAdd => "meleeResAdd",
            EffectKind::ExplosiveResAdd => "explosiveResAdd",
            EffectKind::FallDamageResAdd => "fallDamageResAdd",
            EffectKind::CarryWeightAdd => "carryWeightAdd",
            EffectKind::UnarmedDamageAdd => "unarmedDamageAdd",
            EffectKind::DamageSet => "damageSet",
            EffectKind::DamageTypeChange => "damageTypeChange",
            EffectKind::AmmoChange => "ammoChange",
            EffectKind::AmmoConsumption => "ammoConsumption",
            EffectKind::AllowMuzzleMod => "allowMuzzleMod",
            EffectKind::RerollHitLocation => "rerollHitLocation",
            EffectKind::RangeIncrease => "rangeIncrease",
            EffectKind::RangeDecrease => "rangeDecrease",
            EffectKind::QualityAdd => "qualityAdd",
            EffectKind::QualityRemove => "qualityRemove",
            EffectKind::EffectAdd => "effectAdd",
            EffectKind::EffectRemove => "effectRemove",
            EffectKind::MeleeDamage => "meleeDamage",
            EffectKind::Unknown(key) => key,
        }
    }

    /// Removals run after every other effect of every mod
    pub fn is_removal(&self) -> bool {
        matches!(self, EffectKind::QualityRemove | EffectKind::EffectRemove)
    }
}

/// A parsed effect token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectToken {
    pub kind: EffectKind,
    /// Everything after the first colon, further colons included
    pub value: Option<String>,
}

impl EffectToken {
    /// Parse a raw token. Never fails: unrecognised types become `EffectKind::Unknown`.
    pub fn parse(raw: &str) -> EffectToken {
        let (key, value) = match raw.split_once(':') {
            Some((key, value)) => (key, Some(value)),
            None => (raw, None),
        };
        EffectToken {
            kind: EffectKind::from_key(key.trim()),
            value: value.filter(|v| !v.is_empty()).map(str::to_string),
        }
    }

    pub fn value_str(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }

    pub fn value_i32(&self) -> Option<i32> {
        self.value.as_deref().and_then(|v| v.trim().parse().ok())
    }

    pub fn value_f64(&self) -> Option<f64> {
        self.value.as_deref().and_then(|v| v.trim().parse().ok())
    }

    pub fn value_bool(&self) -> bool {
        self.value.as_deref() == Some("true")
    }
}

impl fmt::Display for EffectToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}:{}", self.kind.key(), value),
            None => write!(f, "{}", self.kind.key()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric() {
        let token = EffectToken::parse("damageAdd:2");
        assert_eq!(token.kind, EffectKind::DamageAdd);
        assert_eq!(token.value_i32(), Some(2));
    }

    #[test]
    fn test_parse_rejoins_colons() {
        let token = EffectToken::parse("qualityAdd:qualityPiercing:1");
        assert_eq!(token.kind, EffectKind::QualityAdd);
        assert_eq!(token.value_str(), "qualityPiercing:1");
    }

    #[test]
    fn test_parse_without_value() {
        let token = EffectToken::parse("effectBurst");
        assert_eq!(token.kind, EffectKind::Unknown("effectBurst".to_string()));
        assert_eq!(token.value, None);
    }

    #[test]
    fn test_aliases_share_kind() {
        assert_eq!(
            EffectToken::parse("damageReductionPhysicalAdd:1").kind,
            EffectKind::PhysicalResAdd
        );
    }

    #[test]
    fn test_display_round_trips_key() {
        let token = EffectToken::parse("rangeIncrease:1");
        assert_eq!(token.to_string(), "rangeIncrease:1");
    }
}
