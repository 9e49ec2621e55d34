//! Invoice rendering
//!
//! Projects a reservation into a standalone HTML invoice, downloaded by
//! the dashboard as `facture_reservation_{id}.html`. Labels are French to
//! match the rest of the domain.

use shared::models::{HotelSettings, ReservationWithRelations};

/// Download filename for a reservation invoice
pub fn filename(reservation_id: i64) -> String {
    format!("facture_reservation_{reservation_id}.html")
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render the invoice HTML for a hydrated reservation
pub fn render(data: &ReservationWithRelations, settings: &HotelSettings) -> String {
    let reservation = &data.reservation;
    let client = &data.client;
    let room = &data.room;
    let nights = reservation.nights();

    format!(
        r#"<!DOCTYPE html>
<html lang="fr">
<head>
<meta charset="utf-8">
<title>Facture - Réservation {id}</title>
<style>
body {{ font-family: sans-serif; margin: 40px; color: #222; }}
h1 {{ font-size: 22px; }}
table {{ border-collapse: collapse; width: 100%; margin-top: 16px; }}
th, td {{ border: 1px solid #ccc; padding: 8px; text-align: left; }}
.total {{ font-weight: bold; }}
.footer {{ margin-top: 32px; font-size: 12px; color: #666; }}
</style>
</head>
<body>
<h1>{hotel_name}</h1>
<p>{hotel_address}<br>{hotel_email} · {hotel_phone}</p>
<h2>Facture — Réservation n°{id}</h2>
<p>Client : {client_name}<br>Email : {client_email}</p>
<table>
<tr><th>Chambre</th><th>Type</th><th>Arrivée</th><th>Départ</th><th>Nuits</th><th>Prix/nuit</th><th>Total</th></tr>
<tr><td>{room_number}</td><td>{room_type}</td><td>{check_in}</td><td>{check_out}</td><td>{nights}</td><td>{price:.2} €</td><td class="total">{total:.2} €</td></tr>
</table>
<p>Statut : {status}<br>Paiement : {payment_status} ({payment_method})</p>
<div class="footer">Merci de votre séjour.</div>
</body>
</html>
"#,
        id = reservation.id,
        hotel_name = escape(&settings.hotel_name),
        hotel_address = escape(&settings.hotel_address),
        hotel_email = escape(&settings.hotel_email),
        hotel_phone = escape(&settings.hotel_phone),
        client_name = escape(&format!("{} {}", client.first_name, client.last_name)),
        client_email = escape(&client.email),
        room_number = escape(&room.number),
        room_type = room.room_type,
        check_in = reservation.check_in_date.format("%d/%m/%Y"),
        check_out = reservation.check_out_date.format("%d/%m/%Y"),
        nights = nights,
        price = room.price,
        total = reservation.total_amount,
        status = reservation.status,
        payment_status = reservation.payment_status,
        payment_method = reservation.payment_method,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::models::{
        Client, PaymentMethod, PaymentStatus, Reservation, ReservationStatus, Room, RoomStatus,
        RoomType,
    };

    fn sample() -> ReservationWithRelations {
        ReservationWithRelations {
            reservation: Reservation {
                id: 7,
                client_id: 1,
                room_id: 2,
                check_in_date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
                check_out_date: NaiveDate::from_ymd_opt(2026, 3, 13).unwrap(),
                status: ReservationStatus::Completed,
                total_amount: 300.0,
                payment_status: PaymentStatus::Paid,
                payment_method: PaymentMethod::Card,
                version: 2,
                created_at: 0,
                updated_at: 0,
            },
            client: Client {
                id: 1,
                first_name: "Marie".into(),
                last_name: "Curie".into(),
                email: "marie@exemple.fr".into(),
                phone: None,
                document: None,
                document_type: None,
                registration_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                created_at: 0,
                updated_at: 0,
            },
            room: Room {
                id: 2,
                number: "101".into(),
                room_type: RoomType::Double,
                price: 100.0,
                capacity: 2,
                status: RoomStatus::Available,
                created_at: 0,
                updated_at: 0,
            },
        }
    }

    #[test]
    fn invoice_contains_reservation_details() {
        let html = render(&sample(), &HotelSettings::default());
        assert!(html.contains("Réservation n°7"));
        assert!(html.contains("Marie Curie"));
        assert!(html.contains("101"));
        assert!(html.contains("300.00 €"));
        assert!(html.contains("Payé"));
        assert!(html.contains("Carte Bancaire"));
    }

    #[test]
    fn html_in_settings_is_escaped() {
        let mut settings = HotelSettings::default();
        settings.hotel_name = "<script>alert(1)</script>".into();
        let html = render(&sample(), &settings);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn filename_embeds_reservation_id() {
        assert_eq!(filename(42), "facture_reservation_42.html");
    }
}
