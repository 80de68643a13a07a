//! Server-rendered markup of the cashbook pages, as the templates produce it.

use cashbook_core::dom::ElementSpec;

pub const PRISONER: &str = "A1409AE";

/// Page `<title>` and `<body>` children.
pub struct Rendered {
    pub title: &'static str,
    pub body: Vec<ElementSpec>,
}

fn el(tag: &str) -> ElementSpec {
    ElementSpec::new(tag)
}

fn link(href: &str, text: &str) -> ElementSpec {
    el("a").attr("href", href).text(text)
}

fn layout(title: &'static str, signed_in: bool, content: Vec<ElementSpec>) -> Rendered {
    let mut header = el("header").child(link("/", "Digital cashbook"));
    if signed_in {
        header = header.child(link("/logout/", "Sign out"));
    }
    Rendered {
        title,
        body: vec![header, el("main").id("content").children(content)],
    }
}

pub fn signin(error: bool, notice: Option<&str>) -> Rendered {
    let mut content = vec![el("h1").text("Sign in")];
    if let Some(notice) = notice {
        content.push(el("p").class("mtp-notice").text(notice));
    }
    if error {
        content.push(
            el("div")
                .class("error-summary")
                .attr("role", "alert")
                .child(el("h1").text("There was a problem"))
                .child(el("p").text(
                    "Please enter a correct username and password. \
                     Note that both fields may be case-sensitive.",
                )),
        );
    }
    content.push(
        el("form")
            .id("login-form")
            .attr("method", "post")
            .attr("action", "/login/")
            .child(el("label").attr("for", "id_username").text("Username"))
            .child(el("input").id("id_username").attr("name", "username"))
            .child(el("label").attr("for", "id_password").text("Password"))
            .child(el("input").id("id_password").attr("name", "password").attr("type", "password"))
            .child(el("button").attr("type", "submit").text("Sign in")),
    );
    layout("Sign in", false, content)
}

pub fn dashboard() -> Rendered {
    layout(
        "Digital cashbook",
        true,
        vec![
            el("h1").text("Digital cashbook"),
            el("ul")
                .class("mtp-dashboard")
                .child(el("li").child(link("/batch", "New credits")))
                .child(el("li").child(link("/locked", "Locked payments")))
                .child(el("li").child(link("/history", "Search all credits")))
                .child(el("li").child(link("/disbursements/", "Disbursements"))),
        ],
    )
}

/// Ticked credits sent to NOMIS together.
pub const CREDITS: [(&str, &str, &str); 3] = [
    ("1", "JAMES HALLS", "12.50"),
    ("2", "SAM WILLIAMS", "100.00"),
    ("3", "ALEX PATEL", "1000.00"),
];

fn credit_row((id, sender, amount): (&str, &str, &str)) -> ElementSpec {
    el("tr")
        .id(&format!("credit-{id}"))
        .child(
            el("td").class("check").child(
                el("input")
                    .id(&format!("id_credit_{id}"))
                    .class("js-RunningTotal-item mtp-input--counted")
                    .attr("type", "checkbox")
                    .attr("name", "credits")
                    .attr("value", id)
                    .data("amount", amount),
            ),
        )
        .child(el("td").text(sender))
        .child(el("td").text(&format!("£{amount}")))
}

pub fn new_credits() -> Rendered {
    let form = el("form")
        .id("batch")
        .class("mtp-form--batch-validation")
        .attr("method", "post")
        .data("credits-name", "credits")
        .child(
            el("p")
                .class("js-RunningTotal")
                .data("label", "Total to process:")
                .child(el("span").text("Selected: "))
                .child(el("span").class("count-checked-checkboxes").text("0")),
        )
        .child(el("p").class("mtp-input--selection-count"))
        .child(
            el("table")
                .child(
                    el("thead").class("mtp-sticky-header").layout(300.0, 40.0, 960.0).child(
                        el("tr")
                            .child(
                                el("th").child(
                                    el("input")
                                        .id("select-all")
                                        .class("mtp-checkboxes--select-all")
                                        .attr("type", "checkbox")
                                        .data("name", "credits"),
                                ),
                            )
                            .child(el("th").text("Sender"))
                            .child(el("th").text("Amount")),
                    ),
                )
                .child(el("tbody").children(CREDITS.map(credit_row))),
        )
        .child(el("button").id("done").attr("type", "submit").attr("name", "submit").attr("value", "submit").text("Done"))
        .child(
            el("dialog")
                .id("incomplete-batch-dialogue")
                .hidden()
                .child(el("h3").text("Are you sure you want to continue?"))
                .child(el("p").text("You have not selected all the new credits."))
                .child(
                    el("button")
                        .id("override")
                        .attr("type", "submit")
                        .attr("name", "submit")
                        .attr("value", "override")
                        .text("Yes, continue"),
                )
                .child(el("a").id("go-back").class("js-Dialog-close").attr("href", "#").text("No, go back")),
        );
    layout("New credits", true, vec![el("h1").text("New credits"), form])
}

pub fn locked() -> Rendered {
    layout(
        "Locked payments",
        true,
        vec![
            el("h1").text("Locked payments"),
            el("p").text("These credits are being processed by other members of staff."),
            el("table").child(
                el("tr")
                    .child(el("td").text("JAMES HALLS"))
                    .child(el("td").text("Locked by Fred Smith")),
            ),
            el("button").id("print").class("js-Print").text("Print this page"),
        ],
    )
}

pub fn history() -> Rendered {
    layout(
        "History",
        true,
        vec![
            el("h1").text("History"),
            el("div").class("mtp-filter-box__control").child(
                el("a")
                    .id("filter-toggle")
                    .attr("href", "#filters")
                    .attr("aria-controls", "filters")
                    .text("Filter credits"),
            ),
            el("form")
                .id("filters")
                .attr("method", "get")
                .child(el("input").id("id_search").attr("name", "search").attr("type", "search"))
                .child(el("button").attr("type", "submit").text("Search")),
            el("table").child(
                el("tr")
                    .child(el("td").text("JAMES HALLS"))
                    .child(el("td").text("£12.50"))
                    .child(el("td").text("Credited")),
            ),
            el("a")
                .id("statement")
                .class("mtp-print-link-target")
                .attr("href", "/history/print/")
                .text("Print credit history"),
        ],
    )
}

pub fn disbursements() -> Rendered {
    let accounts = el("table")
        .class("mtp-accounts-table")
        .child(
            el("tbody")
                .child(el("tr").child(el("th").text("Private")).child(
                    el("td").id("balance-private").class("mtp-accounts-table__amount").data("balance", "private"),
                ))
                .child(el("tr").child(el("th").text("Spends")).child(
                    el("td").id("balance-spends").class("mtp-accounts-table__amount").data("balance", "spends"),
                ))
                .child(el("tr").child(el("th").text("Savings")).child(
                    el("td").id("balance-savings").class("mtp-accounts-table__amount").data("balance", "savings"),
                )),
        )
        .child(
            el("tfoot").child(
                el("tr").child(
                    el("td").child(
                        link(&format!("/disbursements/balances/{PRISONER}/"), "Show balances")
                            .id("show-balances"),
                    ),
                ),
            ),
        );

    let radio = |id: &str, value: &str, reveal: &str| {
        el("input")
            .id(id)
            .class("mtp-radio-reveal")
            .attr("type", "radio")
            .attr("name", "method")
            .attr("value", value)
            .data("reveal", reveal)
    };
    let hidden_section = |id: &str| {
        el("div").id(id).class("mtp-!-display-none-js-enabled-only govuk-!-display-none")
    };
    let address = r#"{"address_line1": "102 Petty France", "address_line2": "", "city": "London", "postcode": "SW1H 9AJ"}"#;

    let form = el("form")
        .id("disbursement")
        .class("js-BeforeUnload")
        .attr("method", "post")
        .data("unload-msg", "Your disbursement has not been sent")
        .child(radio("id_method_bank", "bank_transfer", "#bank-details"))
        .child(radio("id_method_cheque", "cheque", "#cheque-details"))
        .child(
            hidden_section("bank-details")
                .child(el("input").id("id_sort_code").class("mtp-sort-code-control").attr("name", "sort_code"))
                .child(el("input").id("id_account_number").attr("name", "account_number")),
        )
        .child(hidden_section("cheque-details").child(el("p").text("A cheque will be posted.")))
        .child(
            el("select")
                .id("id_saved_address")
                .class("mtp-select__address")
                .child(el("option").attr("value", "").text("Choose an address"))
                .child(el("option").attr("value", "1").data("address", address).text("102 Petty France")),
        )
        .child(el("input").id("id_address_line1").attr("name", "address_line1"))
        .child(el("input").id("id_address_line2").attr("name", "address_line2"))
        .child(el("input").id("id_city").attr("name", "city"))
        .child(el("input").id("id_postcode").attr("name", "postcode"))
        .child(
            el("input")
                .id("id_email")
                .class("mtp-email-input--disbursements")
                .attr("type", "email")
                .attr("name", "email"),
        )
        .child(el("textarea").id("id_remittance_description").attr("name", "remittance_description"))
        .child(
            el("button")
                .id("send")
                .attr("type", "submit")
                .attr("name", "next")
                .attr("value", "submit")
                .text("Continue"),
        );

    layout(
        "Disbursements",
        true,
        vec![el("h1").text("Send money out"), accounts, form],
    )
}
