//! Catalog wiring: the result set plus the bus that feeds the forms.
//!
//! Forms live behind `Rc<RefCell<..>>` so bus handlers can update them;
//! everything runs on one thread.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::errors::{Error, Result};
use crate::events::{Event, EventBus, EventKind, LeadPrefill, SubscriptionId};
use crate::finance::FinancingForm;
use crate::inventory::{id_from_slug, Vehicle, VehicleId, VehicleStatus};
use crate::leads::LeadForm;
use crate::refine::ResultSet;

#[derive(Debug)]
pub struct Storefront {
    results: ResultSet,
    bus: EventBus,
}

impl Storefront {
    pub fn new(results: ResultSet) -> Self {
        Self {
            results,
            bus: EventBus::new(),
        }
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    pub fn results_mut(&mut self) -> &mut ResultSet {
        &mut self.results
    }

    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    /// Route price broadcasts into `form`.
    pub fn connect_estimator(&mut self, form: Rc<RefCell<FinancingForm>>) -> SubscriptionId {
        self.bus
            .subscribe(EventKind::EstimatorSetPrice, move |event| {
                if let Event::EstimatorSetPrice { price } = event {
                    form.borrow_mut().on_set_price(*price);
                }
            })
    }

    /// Route test-drive requests into `form`.
    pub fn connect_lead_form(&mut self, form: Rc<RefCell<LeadForm>>) -> SubscriptionId {
        self.bus.subscribe(EventKind::LeadPrefill, move |event| {
            if let Event::LeadPrefill(prefill) = event {
                form.borrow_mut().apply_prefill(prefill);
            }
        })
    }

    /// Open the quick view for a vehicle. A positive price is broadcast to
    /// the estimator.
    pub fn open_vehicle(&mut self, id: &VehicleId) -> Result<&Vehicle> {
        let vehicle = self
            .results
            .find(id)
            .ok_or_else(|| Error::UnknownVehicle(id.to_string()))?;
        if let Some(price) = vehicle.price.filter(|p| *p > 0.0) {
            let delivered = self.bus.publish(&Event::EstimatorSetPrice { price });
            debug!(%id, price, delivered, "opened vehicle");
        }
        Ok(vehicle)
    }

    /// Resolve a detail-page slug and open that vehicle.
    pub fn open_slug(&mut self, slug: &str) -> Result<&Vehicle> {
        let id = id_from_slug(slug).ok_or_else(|| Error::UnknownVehicle(slug.to_string()))?;
        self.open_vehicle(&id)
    }

    /// "Schedule a test drive" on a card: prefill the lead form.
    ///
    /// Only available vehicles can be booked; pending and sold ones are
    /// refused without publishing anything.
    pub fn request_test_drive(&mut self, id: &VehicleId) -> Result<LeadPrefill> {
        let vehicle = self
            .results
            .find(id)
            .ok_or_else(|| Error::UnknownVehicle(id.to_string()))?;
        if vehicle.status != VehicleStatus::Available {
            return Err(Error::NotAvailable {
                id: id.to_string(),
                status: vehicle.status.display_name().to_lowercase(),
            });
        }
        let prefill = LeadPrefill {
            title: vehicle.title(),
            price: vehicle.price,
            miles: vehicle.miles,
        };
        self.bus.publish(&Event::LeadPrefill(prefill.clone()));
        Ok(prefill)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finance::FinanceField;

    fn storefront() -> Storefront {
        let vehicles = vec![
            Vehicle::new(1, 2016, "Toyota", "Camry")
                .with_price(11_900.0)
                .with_miles(84_000.0),
            Vehicle::new(2, 2010, "Ford", "Ranger"),
        ];
        Storefront::new(ResultSet::new(vehicles, 8))
    }

    #[test]
    fn test_open_vehicle_prefills_estimator() {
        let mut store = storefront();
        let form = Rc::new(RefCell::new(FinancingForm::default()));
        store.connect_estimator(Rc::clone(&form));

        store.open_vehicle(&VehicleId::Int(1)).unwrap();
        assert_eq!(form.borrow().price(), 11_900.0);
        assert_eq!(form.borrow().down(), 1_190.0);
    }

    #[test]
    fn test_unpriced_vehicle_does_not_broadcast() {
        let mut store = storefront();
        let form = Rc::new(RefCell::new(FinancingForm::default()));
        store.connect_estimator(Rc::clone(&form));

        store.open_vehicle(&VehicleId::Int(2)).unwrap();
        assert_eq!(form.borrow().price(), 20_000.0);
    }

    #[test]
    fn test_focused_estimator_ignores_broadcast() {
        let mut store = storefront();
        let form = Rc::new(RefCell::new(FinancingForm::default()));
        form.borrow_mut().focus(FinanceField::Down);
        store.connect_estimator(Rc::clone(&form));

        store.open_vehicle(&VehicleId::Int(1)).unwrap();
        assert_eq!(form.borrow().price(), 20_000.0);
    }

    #[test]
    fn test_request_test_drive_fills_lead_form() {
        let mut store = storefront();
        let lead = Rc::new(RefCell::new(LeadForm::new()));
        store.connect_lead_form(Rc::clone(&lead));

        let prefill = store.request_test_drive(&VehicleId::Int(1)).unwrap();
        assert_eq!(prefill.title, "2016 Toyota Camry");
        assert_eq!(lead.borrow().vehicle, "2016 Toyota Camry");
        assert!(lead.borrow().message.contains("Miles: 84,000 mi"));
    }

    #[test]
    fn test_unknown_vehicle_is_an_error() {
        let mut store = storefront();
        let err = store.open_vehicle(&VehicleId::Int(99)).unwrap_err();
        assert!(matches!(err, Error::UnknownVehicle(ref id) if id == "99"));
        assert!(store.open_slug("2016-toyota-camry").is_err());
    }

    #[test]
    fn test_test_drive_refused_for_pending_and_sold() {
        let vehicles = vec![
            Vehicle::new(1, 2015, "Honda", "Accord").with_status(VehicleStatus::Pending),
            Vehicle::new(2, 2011, "Toyota", "Corolla").with_status(VehicleStatus::Sold),
        ];
        let mut store = Storefront::new(ResultSet::new(vehicles, 8));
        let lead = Rc::new(RefCell::new(LeadForm::new()));
        store.connect_lead_form(Rc::clone(&lead));

        let err = store.request_test_drive(&VehicleId::Int(1)).unwrap_err();
        assert!(matches!(err, Error::NotAvailable { ref status, .. } if status == "pending"));
        let err = store.request_test_drive(&VehicleId::Int(2)).unwrap_err();
        assert_eq!(err.to_string(), "Vehicle 2 is sold");
        assert_eq!(*lead.borrow(), LeadForm::new());
    }

    #[test]
    fn test_open_slug_with_uppercase_uuid() {
        let id = "9f1c2d3e-4b5a-4c6d-8e7f-0a1b2c3d4e5f";
        let vehicles = vec![Vehicle::new(id, 2019, "Ram", "1500").with_price(24_000.0)];
        let mut store = Storefront::new(ResultSet::new(vehicles, 8));
        let vehicle = store
            .open_slug("2019-ram-1500-9F1C2D3E-4B5A-4C6D-8E7F-0A1B2C3D4E5F")
            .unwrap();
        assert_eq!(vehicle.id, VehicleId::Text(id.to_string()));
    }

    #[test]
    fn test_open_slug() {
        let mut store = storefront();
        let vehicle = store.open_slug("2016-toyota-camry-1").unwrap();
        assert_eq!(vehicle.make, "Toyota");
    }
}
