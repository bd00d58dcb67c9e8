// Sort directives - "<field>:asc" / "<field>:desc"
use std::fmt;
use std::str::FromStr;

/// A sort directive as received on the wire: the name of a sortable
/// value plus its direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub value_name: String,
    pub ascending: bool,
}

impl OrderBy {
    pub fn new(value_name: impl Into<String>, ascending: bool) -> Self {
        Self {
            value_name: value_name.into(),
            ascending,
        }
    }

    pub fn asc(value_name: impl Into<String>) -> Self {
        Self::new(value_name, true)
    }

    pub fn to_asc_string(&self) -> String {
        format!("{}:asc", self.value_name)
    }

    pub fn to_desc_string(&self) -> String {
        format!("{}:desc", self.value_name)
    }

    /// Both serializations of this value name, ascending first.
    pub fn choices(&self) -> [String; 2] {
        [self.to_asc_string(), self.to_desc_string()]
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = if self.ascending { "asc" } else { "desc" };
        write!(f, "{}:{}", self.value_name, direction)
    }
}

impl FromStr for OrderBy {
    type Err = String;

    /// Anything after the colon other than `desc` sorts ascending.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, direction) = s.split_once(':').ok_or_else(|| {
            format!("Malformed order-by value '{}', expected <field>:<asc|desc>", s)
        })?;

        if name.is_empty() {
            return Err(format!("Malformed order-by value '{}', missing field name", s));
        }

        Ok(Self::new(name, direction != "desc"))
    }
}

/// A typed sortable column of one entity.
///
/// `FIELDS` is the whitelist exposed to clients; its first entry is the
/// default when no directive is supplied.
pub trait SortField: Copy + Sized + Send + Sync + 'static {
    const FIELDS: &'static [&'static str];

    fn from_value_name(name: &str) -> Option<Self>;

    /// Column used by the relational store.
    fn column(self) -> &'static str;

    /// Every accepted `order-by` string, in whitelist order.
    fn choices() -> Vec<String> {
        Self::FIELDS
            .iter()
            .flat_map(|f| OrderBy::asc(*f).choices())
            .collect()
    }

    fn default_order() -> OrderBy {
        OrderBy::asc(Self::FIELDS[0])
    }
}

/// A resolved sort: a whitelisted field and a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort<F: SortField> {
    pub field: F,
    pub ascending: bool,
}

impl<F: SortField> Sort<F> {
    pub fn new(field: F, ascending: bool) -> Self {
        Self { field, ascending }
    }

    /// Resolve a wire directive; `None` when the field is not sortable.
    pub fn resolve(order_by: &OrderBy) -> Option<Self> {
        F::from_value_name(&order_by.value_name).map(|field| Self::new(field, order_by.ascending))
    }

    pub fn sql_direction(&self) -> &'static str {
        if self.ascending { "ASC" } else { "DESC" }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AquariumSort {
    Name,
    Liter,
}

impl SortField for AquariumSort {
    const FIELDS: &'static [&'static str] = &["name", "liter"];

    fn from_value_name(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Self::Name),
            "liter" => Some(Self::Liter),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Liter => "volume_in_liter",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureSort {
    Celsius,
    Date,
}

impl SortField for TemperatureSort {
    const FIELDS: &'static [&'static str] = &["celsius", "date"];

    fn from_value_name(name: &str) -> Option<Self> {
        match name {
            "celsius" => Some(Self::Celsius),
            "date" => Some(Self::Date),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            Self::Celsius => "temperature",
            Self::Date => "recorded_at",
        }
    }
}

/// Chemicals and fertilizers only sort by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSort {
    Name,
}

impl SortField for NameSort {
    const FIELDS: &'static [&'static str] = &["name"];

    fn from_value_name(name: &str) -> Option<Self> {
        (name == "name").then_some(Self::Name)
    }

    fn column(self) -> &'static str {
        "name"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FertilizationSort {
    Amount,
    Date,
}

impl SortField for FertilizationSort {
    const FIELDS: &'static [&'static str] = &["amount", "date"];

    fn from_value_name(name: &str) -> Option<Self> {
        match name {
            "amount" => Some(Self::Amount),
            "date" => Some(Self::Date),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            Self::Amount => "amount_in_milliliter",
            Self::Date => "recorded_at",
        }
    }
}
