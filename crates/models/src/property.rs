//! Property listings.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::activity::{Audited, NewActivity};
use crate::{errors::ModelError, user, validate};

pub const PROPERTY_TYPES: &[&str] = &["apartment", "house", "condo", "commercial"];
pub const STATUSES: &[&str] = &["available", "sold", "rented", "pending"];
pub const DEFAULT_STATUS: &str = "available";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "properties")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub property_type: String,
    pub status: String,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub price: Decimal,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub square_footage: Option<i32>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub lot_size: Option<Decimal>,
    pub year_built: Option<i32>,
    pub image_urls: Option<Vec<String>>,
    pub features: Option<Vec<String>>,
    pub listing_agent: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    ListingAgent,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::ListingAgent => Entity::belongs_to(user::Entity)
                .from(Column::ListingAgent)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::ListingAgent.def() }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProperty {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub property_type: String,
    #[serde(default)]
    pub status: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub bedrooms: Option<i32>,
    #[serde(default)]
    pub bathrooms: Option<i32>,
    #[serde(default)]
    pub square_footage: Option<i32>,
    #[serde(default)]
    pub lot_size: Option<Decimal>,
    #[serde(default)]
    pub year_built: Option<i32>,
    #[serde(default)]
    pub image_urls: Option<Vec<String>>,
    #[serde(default)]
    pub features: Option<Vec<String>>,
    #[serde(default)]
    pub listing_agent: Option<String>,
}

fn check_measures(
    price: Option<Decimal>,
    bedrooms: Option<i32>,
    bathrooms: Option<i32>,
    square_footage: Option<i32>,
    lot_size: Option<Decimal>,
    year_built: Option<i32>,
) -> Result<(), ModelError> {
    validate::non_negative_decimal("price", price)?;
    validate::non_negative("bedrooms", bedrooms)?;
    validate::non_negative("bathrooms", bathrooms)?;
    validate::non_negative("squareFootage", square_footage)?;
    validate::non_negative_decimal("lotSize", lot_size)?;
    validate::non_negative("yearBuilt", year_built)?;
    Ok(())
}

impl NewProperty {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate::required("title", &self.title)?;
        validate::required("address", &self.address)?;
        validate::required("city", &self.city)?;
        validate::required("state", &self.state)?;
        validate::required("zipCode", &self.zip_code)?;
        validate::one_of("propertyType", &self.property_type, PROPERTY_TYPES)?;
        if let Some(s) = self.status.as_deref() {
            validate::one_of("status", s, STATUSES)?;
        }
        check_measures(
            Some(self.price),
            self.bedrooms,
            self.bathrooms,
            self.square_footage,
            self.lot_size,
            self.year_built,
        )
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyChanges {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub description: Option<Option<String>>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub property_type: Option<String>,
    pub status: Option<String>,
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub bedrooms: Option<Option<i32>>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub bathrooms: Option<Option<i32>>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub square_footage: Option<Option<i32>>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub lot_size: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub year_built: Option<Option<i32>>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub image_urls: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub features: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub listing_agent: Option<Option<String>>,
}

impl PropertyChanges {
    pub fn validate(&self) -> Result<(), ModelError> {
        for (field, value) in [
            ("title", &self.title),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("zipCode", &self.zip_code),
        ] {
            if let Some(v) = value { validate::required(field, v)?; }
        }
        if let Some(v) = &self.property_type { validate::one_of("propertyType", v, PROPERTY_TYPES)?; }
        if let Some(v) = &self.status { validate::one_of("status", v, STATUSES)?; }
        check_measures(
            self.price,
            self.bedrooms.flatten(),
            self.bathrooms.flatten(),
            self.square_footage.flatten(),
            self.lot_size.flatten(),
            self.year_built.flatten(),
        )
    }

    pub fn apply(self, am: &mut ActiveModel) -> Result<(), ModelError> {
        self.validate()?;
        if let Some(v) = self.title { am.title = Set(v); }
        if let Some(v) = self.description { am.description = Set(validate::blank_to_none(v)); }
        if let Some(v) = self.address { am.address = Set(v); }
        if let Some(v) = self.city { am.city = Set(v); }
        if let Some(v) = self.state { am.state = Set(v); }
        if let Some(v) = self.zip_code { am.zip_code = Set(v); }
        if let Some(v) = self.property_type { am.property_type = Set(v); }
        if let Some(v) = self.status { am.status = Set(v); }
        if let Some(v) = self.price { am.price = Set(v); }
        if let Some(v) = self.bedrooms { am.bedrooms = Set(v); }
        if let Some(v) = self.bathrooms { am.bathrooms = Set(v); }
        if let Some(v) = self.square_footage { am.square_footage = Set(v); }
        if let Some(v) = self.lot_size { am.lot_size = Set(v); }
        if let Some(v) = self.year_built { am.year_built = Set(v); }
        if let Some(v) = self.image_urls { am.image_urls = Set(v); }
        if let Some(v) = self.features { am.features = Set(v); }
        if let Some(v) = self.listing_agent { am.listing_agent = Set(v); }
        am.updated_at = Set(Utc::now().into());
        Ok(())
    }
}

pub async fn insert<C: ConnectionTrait>(db: &C, input: NewProperty) -> Result<Model, ModelError> {
    input.validate()?;
    let now = Utc::now().into();
    let am = ActiveModel {
        title: Set(input.title),
        description: Set(validate::blank_to_none(input.description)),
        address: Set(input.address),
        city: Set(input.city),
        state: Set(input.state),
        zip_code: Set(input.zip_code),
        property_type: Set(input.property_type),
        status: Set(input.status.unwrap_or_else(|| DEFAULT_STATUS.to_string())),
        price: Set(input.price),
        bedrooms: Set(input.bedrooms),
        bathrooms: Set(input.bathrooms),
        square_footage: Set(input.square_footage),
        lot_size: Set(input.lot_size),
        year_built: Set(input.year_built),
        image_urls: Set(input.image_urls),
        features: Set(input.features),
        listing_agent: Set(input.listing_agent),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

impl Audited for Model {
    fn creation_activity(&self) -> NewActivity {
        NewActivity {
            title: "Property listed".into(),
            description: Some(format!("Property \"{}\" has been listed", self.title)),
            activity_type: "property_created".into(),
            entity_type: Some("property".into()),
            entity_id: Some(self.id),
            user_id: self.listing_agent.clone(),
        }
    }
}
