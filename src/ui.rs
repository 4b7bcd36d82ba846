use crate::models::{DONE_LABEL, PENDING_LABEL};
use crate::view::{CellView, DailyView, DayColumn, MemberView, Mode, View, WeeklyRow, WeeklyView};

pub fn render_view(view: &View) -> String {
    match view {
        View::Daily(daily) => render_daily(daily),
        View::Weekly(weekly) => render_weekly(weekly),
    }
}

pub fn render_daily(view: &DailyView) -> String {
    let mut cards = String::new();
    for row in &view.rows {
        cards.push_str(&daily_card(&row.member, &row.cell));
    }

    let heading = format!(
        "{} ({}){}",
        view.date,
        view.weekday,
        if view.is_today { " · 오늘" } else { "" }
    );
    let toolbar = format!(
        r#"<a class="nav-btn" href="/daily?date={prev}" id="prev-date" aria-label="이전 날짜">&#8249;</a>
        <input type="date" id="report-date" value="{date}" />
        <a class="nav-btn" href="/daily?date={next}" id="next-date" aria-label="다음 날짜">&#8250;</a>
        <a class="link-btn" href="/daily">오늘</a>
        <a class="link-btn" href="{weekly}?date={date}">주간 보기</a>"#,
        prev = view.prev_date,
        next = view.next_date,
        date = view.date,
        weekly = Mode::Weekly.path(),
    );
    let body = format!(r#"<section class="members-grid" id="members-grid">{cards}</section>"#);

    render_page(
        "일일 업무 보고",
        &escape_html(&heading),
        &toolbar,
        &body,
    )
}

pub fn render_weekly(view: &WeeklyView) -> String {
    let mut head = String::from(r#"<th class="member-col">팀원</th>"#);
    for column in &view.columns {
        head.push_str(&day_header(column));
    }

    let mut rows = String::new();
    for row in &view.rows {
        rows.push_str(&weekly_row(row));
    }

    let heading = format!("{} · {} ~ {}", view.week_label, view.monday, view.sunday);
    let toolbar = format!(
        r#"<a class="nav-btn" href="/weekly?date={prev}" id="prev-week" aria-label="이전 주">&#8249;</a>
        <a class="link-btn" href="/weekly">이번 주</a>
        <a class="nav-btn" href="/weekly?date={next}" id="next-week" aria-label="다음 주">&#8250;</a>
        <a class="link-btn" href="{daily}?date={monday}">일간 보기</a>"#,
        prev = view.prev_monday,
        next = view.next_monday,
        monday = view.monday,
        daily = Mode::Daily.path(),
    );
    let body = format!(
        r#"<div class="table-wrap"><table class="week-table"><thead><tr>{head}</tr></thead><tbody>{rows}</tbody></table></div>"#
    );

    render_page("주간 업무 보고", &escape_html(&heading), &toolbar, &body)
}

fn daily_card(member: &MemberView, cell: &CellView) -> String {
    format!(
        r#"
      <article class="member-card report-cell{done_class}" style="--accent: {color}" data-date="{date}" data-member="{id}">
        <div class="card-header">
          <div class="member-name-wrap">
            <span class="member-index">{badge}</span>
            {name}
          </div>
          {toggle}
        </div>
        <textarea class="member-content" placeholder="업무 내용을 입력하세요...">{content}</textarea>
        <div class="card-footer">
          <button class="save-btn" type="button">저장</button>
        </div>
      </article>"#,
        done_class = if cell.done { " done" } else { "" },
        color = member.color,
        date = cell.date,
        id = member.id,
        badge = member.badge,
        name = name_field(member),
        toggle = done_toggle(cell),
        content = escape_html(&cell.content),
    )
}

fn day_header(column: &DayColumn) -> String {
    format!(
        r#"<th class="day-col{markers}" data-date="{date}"><span class="day-label">{label} ({weekday})</span><span class="day-summary">완료 {done}/{total}</span></th>"#,
        markers = marker_classes(column.is_today, column.is_weekend),
        date = column.date,
        label = column.label,
        weekday = column.weekday,
        done = column.summary.done_count,
        total = column.summary.total,
    )
}

fn weekly_row(row: &WeeklyRow) -> String {
    let mut html = format!(
        r#"<tr><th class="member-cell" style="--accent: {color}"><span class="member-index">{badge}</span>{name}</th>"#,
        color = row.member.color,
        badge = row.member.badge,
        name = name_field(&row.member),
    );
    for cell in &row.cells {
        html.push_str(&format!(
            r#"<td class="report-cell{done_class}{markers}" data-date="{date}" data-member="{id}"><textarea class="member-content" rows="3">{content}</textarea>{toggle}</td>"#,
            done_class = if cell.done { " done" } else { "" },
            markers = marker_classes(cell.is_today, cell.is_weekend),
            date = cell.date,
            id = cell.member,
            content = escape_html(&cell.content),
            toggle = done_toggle(cell),
        ));
    }
    html.push_str("</tr>");
    html
}

fn name_field(member: &MemberView) -> String {
    format!(
        r#"<span class="member-name" contenteditable="true" data-member="{id}" title="클릭하여 이름 수정">{name}</span>"#,
        id = member.id,
        name = escape_html(&member.name),
    )
}

fn done_toggle(cell: &CellView) -> String {
    format!(
        r#"<label class="done-label"><input type="checkbox" class="done-check"{checked} /><span class="done-text">{label}</span></label>"#,
        checked = if cell.done { " checked" } else { "" },
        label = cell.status_label,
    )
}

fn marker_classes(is_today: bool, is_weekend: bool) -> &'static str {
    match (is_today, is_weekend) {
        (true, true) => " today weekend",
        (true, false) => " today",
        (false, true) => " weekend",
        (false, false) => "",
    }
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn render_page(title: &str, heading: &str, toolbar: &str, body: &str) -> String {
    PAGE_HTML
        .replace("{{TITLE}}", title)
        .replace("{{HEADING}}", heading)
        .replace("{{TOOLBAR}}", toolbar)
        .replace("{{DONE_LABEL}}", DONE_LABEL)
        .replace("{{PENDING_LABEL}}", PENDING_LABEL)
        .replace("{{BODY}}", body)
}

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="ko">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    :root {
      --bg: #f4f6fb;
      --ink: #24292f;
      --muted: #6b7280;
      --line: #e3e7ef;
      --card: #ffffff;
      --ok: #2d7a4b;
      --err: #c63b2b;
      --shadow: 0 10px 30px rgba(36, 41, 47, 0.08);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: var(--bg);
      color: var(--ink);
      font-family: "Pretendard", "Apple SD Gothic Neo", "Malgun Gothic", sans-serif;
      padding: 28px 18px 48px;
    }

    .app {
      width: min(1200px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 20px;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
    }

    h1 {
      margin: 0;
      font-size: 1.6rem;
    }

    .subtitle {
      margin: 4px 0 0;
      color: var(--muted);
    }

    .toolbar {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      gap: 8px;
    }

    .nav-btn,
    .link-btn,
    button {
      appearance: none;
      border: 1px solid var(--line);
      background: var(--card);
      color: var(--ink);
      border-radius: 10px;
      padding: 8px 14px;
      font-size: 0.95rem;
      text-decoration: none;
      cursor: pointer;
    }

    .nav-btn {
      font-size: 1.2rem;
      line-height: 1;
    }

    .primary {
      background: #4a90e2;
      border-color: #4a90e2;
      color: white;
    }

    input[type="date"] {
      border: 1px solid var(--line);
      border-radius: 10px;
      padding: 7px 10px;
      font: inherit;
    }

    .members-grid {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(320px, 1fr));
      gap: 16px;
    }

    .member-card {
      background: var(--card);
      border-radius: 16px;
      border-top: 4px solid var(--accent);
      box-shadow: var(--shadow);
      padding: 16px;
      display: grid;
      gap: 12px;
    }

    .member-card.done {
      background: #f3fbf6;
    }

    .card-header {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 8px;
    }

    .member-name-wrap {
      display: flex;
      align-items: center;
      gap: 8px;
    }

    .member-index {
      display: inline-grid;
      place-items: center;
      width: 24px;
      height: 24px;
      border-radius: 50%;
      background: var(--accent);
      color: white;
      font-size: 0.8rem;
      margin-right: 6px;
    }

    .member-name {
      font-weight: 600;
      outline: none;
      border-bottom: 1px dashed transparent;
    }

    .member-name:focus {
      border-bottom-color: var(--accent);
    }

    .done-label {
      display: inline-flex;
      align-items: center;
      gap: 4px;
      font-size: 0.85rem;
      color: var(--muted);
    }

    .done .done-text {
      color: var(--ok);
      font-weight: 600;
    }

    .member-content {
      width: 100%;
      min-height: 110px;
      resize: vertical;
      border: 1px solid var(--line);
      border-radius: 10px;
      padding: 10px;
      font: inherit;
    }

    .card-footer {
      display: flex;
      justify-content: flex-end;
    }

    .table-wrap {
      overflow-x: auto;
      background: var(--card);
      border-radius: 16px;
      box-shadow: var(--shadow);
    }

    .week-table {
      width: 100%;
      border-collapse: collapse;
      min-width: 980px;
    }

    .week-table th,
    .week-table td {
      border: 1px solid var(--line);
      padding: 8px;
      vertical-align: top;
    }

    .week-table .member-content {
      min-height: 72px;
      font-size: 0.85rem;
    }

    .member-cell {
      text-align: left;
      white-space: nowrap;
      border-left: 4px solid var(--accent) !important;
    }

    .day-col span {
      display: block;
    }

    .day-summary {
      font-size: 0.75rem;
      color: var(--muted);
      font-weight: 400;
    }

    .weekend {
      background: #fafafa;
    }

    .day-col.weekend .day-label {
      color: var(--err);
    }

    .today {
      background: #eef5ff;
    }

    .report-cell.done {
      background: #f3fbf6;
    }

    .toast {
      position: fixed;
      left: 50%;
      bottom: 28px;
      transform: translate(-50%, 20px);
      background: var(--ink);
      color: white;
      padding: 10px 18px;
      border-radius: 999px;
      opacity: 0;
      pointer-events: none;
      transition: opacity 200ms ease, transform 200ms ease;
    }

    .toast.show {
      opacity: 1;
      transform: translate(-50%, 0);
    }

    .toast[data-type="error"] {
      background: var(--err);
    }

    @media print {
      body {
        background: white;
        padding: 0;
      }
      .toolbar,
      .card-footer,
      .toast,
      .done-check {
        display: none;
      }
      .member-card,
      .table-wrap {
        box-shadow: none;
      }
      .member-content {
        border: none;
        resize: none;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <div>
        <h1>{{TITLE}}</h1>
        <p class="subtitle">{{HEADING}}</p>
      </div>
      <div class="toolbar">
        {{TOOLBAR}}
        <button class="primary" type="button" id="save-all-btn">전체 저장</button>
        <button type="button" id="print-btn">인쇄</button>
      </div>
    </header>

    {{BODY}}
  </main>

  <div class="toast" id="toast" role="status"></div>

  <script>
    const DONE_LABEL = '{{DONE_LABEL}}';
    const PENDING_LABEL = '{{PENDING_LABEL}}';
    const toastEl = document.getElementById('toast');
    let toastTimer = null;

    const showToast = (message, type) => {
      toastEl.textContent = message;
      toastEl.dataset.type = type || 'ok';
      toastEl.classList.add('show');
      clearTimeout(toastTimer);
      toastTimer = setTimeout(() => toastEl.classList.remove('show'), 2000);
    };

    const request = async (method, url, body) => {
      const res = await fetch(url, {
        method,
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(body)
      });
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || '저장에 실패했습니다.');
      }
      return res.json();
    };

    const readCell = (cell) => ({
      content: cell.querySelector('.member-content').value,
      done: cell.querySelector('.done-check').checked
    });

    const setDoneState = (cell, done) => {
      cell.classList.toggle('done', done);
      cell.querySelector('.done-text').textContent = done ? DONE_LABEL : PENDING_LABEL;
    };

    const fail = (err) => showToast(err.message, 'error');

    document.querySelectorAll('.member-name').forEach((el) => {
      el.addEventListener('blur', () => {
        const id = el.dataset.member;
        request('PUT', `/api/members/${id}`, { name: el.textContent })
          .then((member) => {
            document
              .querySelectorAll(`.member-name[data-member="${member.id}"]`)
              .forEach((node) => { node.textContent = member.name; });
          })
          .catch(fail);
      });
      el.addEventListener('keydown', (event) => {
        if (event.key === 'Enter') {
          event.preventDefault();
          el.blur();
        }
      });
    });

    document.querySelectorAll('.done-check').forEach((checkbox) => {
      checkbox.addEventListener('change', () => {
        const cell = checkbox.closest('.report-cell');
        setDoneState(cell, checkbox.checked);
        const { date, member } = cell.dataset;
        request('POST', `/api/reports/${date}/${member}/completion`, {
          done: checkbox.checked,
          content: cell.querySelector('.member-content').value
        })
          .then(() => showToast('저장되었습니다.'))
          .catch(fail);
      });
    });

    document.querySelectorAll('.save-btn').forEach((button) => {
      button.addEventListener('click', () => {
        const cell = button.closest('.report-cell');
        const { date, member } = cell.dataset;
        request('PUT', `/api/reports/${date}/${member}`, readCell(cell))
          .then(() => showToast('저장되었습니다.'))
          .catch(fail);
      });
    });

    document.getElementById('save-all-btn').addEventListener('click', () => {
      const reports = {};
      document.querySelectorAll('.report-cell').forEach((cell) => {
        const { date, member } = cell.dataset;
        reports[date] = reports[date] || {};
        reports[date][member] = readCell(cell);
      });
      request('POST', '/api/save-all', { reports })
        .then(() => showToast('전체 저장되었습니다.'))
        .catch(fail);
    });

    document.getElementById('print-btn').addEventListener('click', () => window.print());

    const dateInput = document.getElementById('report-date');
    if (dateInput) {
      dateInput.addEventListener('change', () => {
        if (dateInput.value) {
          window.location.href = `/daily?date=${dateInput.value}`;
        }
      });
    }
  </script>
</body>
</html>
"#;
