//! Bill DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::RoomId;
use domain_billing::{BillNumber, CreateBillRequest};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBillBody {
    pub room_id: RoomId,

    #[validate(length(min = 1, max = 200, message = "Customer name must be 1-200 characters"))]
    pub customer_name: String,

    #[validate(length(max = 30, message = "Phone must be at most 30 characters"))]
    pub customer_phone: Option<String>,

    #[validate(length(max = 500, message = "Address must be at most 500 characters"))]
    pub customer_address: Option<String>,

    pub check_in_date: NaiveDate,

    pub check_out_date: NaiveDate,

    /// Overrides the room's nightly rate for this bill
    pub price_per_day: Option<Decimal>,

    /// A number obtained earlier from `POST /bills/number`
    pub bill_number: Option<String>,
}

impl From<CreateBillBody> for CreateBillRequest {
    fn from(body: CreateBillBody) -> Self {
        CreateBillRequest {
            room_id: body.room_id,
            customer_name: body.customer_name,
            customer_phone: body.customer_phone,
            customer_address: body.customer_address,
            check_in_date: body.check_in_date,
            check_out_date: body.check_out_date,
            price_per_day: body.price_per_day,
            bill_number: body.bill_number,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BillNumberResponse {
    pub bill_number: BillNumber,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RevenueQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
}
